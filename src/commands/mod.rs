mod decompose;
mod fill_indels;

pub use decompose::decompose;
pub use fill_indels::fill_indels;

use crate::utils::util::Result;
use rayon::{ThreadPool, ThreadPoolBuilder};

fn build_thread_pool(num_threads: usize) -> Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new().num_threads(num_threads).build()?;
    log::debug!("Using {} thread(s)", pool.current_num_threads());
    Ok(pool)
}

//! Check or apply clang-format over a C++ codebase.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[path = "../real_host.rs"]
mod real_host;

use cxxkit_lib::run_format;
use real_host::RealHost;

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run_format(&mut RealHost, std::env::args()).await
}

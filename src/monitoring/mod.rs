/*!
 * Monitoring
 * Tracing subscriber setup and wait instrumentation
 */

mod tracer;

pub use tracer::{init_tracing, wait_traced, WaitSpan};

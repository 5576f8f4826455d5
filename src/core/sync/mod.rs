/*!
 * Synchronization Primitives
 *
 * Blocking building blocks shared by the broadcast cells:
 * - `ReadySignal`: one-way latch with lock-free probe and condvar wakeup
 * - `WakeResult`: what a signal did when it fired
 */

mod signal;
mod traits;

pub use signal::ReadySignal;
pub use traits::WakeResult;

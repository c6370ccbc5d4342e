/// Per-target-slot source mapping and its cost
pub mod assignment;
/// Exact assignment delegate: cost matrix, solver capability and result checks
pub mod exact;
/// Run executor enforcing validation, mode dispatch and one run at a time
pub mod executor;
/// Bounded-window greedy assignment
pub mod greedy;
/// Default exact solver backed by the Kuhn-Munkres method
pub mod munkres;
/// Source pixel pool with used markers
pub mod pool;
/// Chunked progress reporting and cooperative yielding
pub mod scheduler;
/// Quality parameter and candidate window policy
pub mod window;

//! Grid search algorithms for the pathviz visualizer.
//!
//! Four searches are provided, each recording the order in which cells are
//! finalized so the exploration can be replayed step by step:
//!
//! - **BFS**: FIFO frontier, shortest by hop count ([`bfs`])
//! - **DFS**: LIFO frontier, reachability only ([`dfs`])
//! - **Dijkstra**: cumulative-weight frontier, shortest weighted path ([`dijkstra`])
//! - **A\***: Dijkstra guided by Manhattan distance ([`astar`])
//!
//! Every search runs in place on the [`Grid`](pathviz_core::Grid) it is
//! given: per-run annotations are reset first, then written as the search
//! proceeds. Use [`Algorithm::search`] to run on a snapshot instead.
//!
//! | Algorithm | Frontier | Shortest path |
//! |---|---|---|
//! | [`Algorithm::Bfs`] | queue | hops |
//! | [`Algorithm::Dfs`] | stack | no |
//! | [`Algorithm::Dijkstra`] | binary heap on `g` | weighted |
//! | [`Algorithm::AStar`] | binary heap on `g + h` | weighted |

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;
mod frontier;
mod neighbors;
mod search;

pub use astar::astar;
pub use bfs::bfs;
pub use dfs::dfs;
pub use dijkstra::dijkstra;
pub use distance::manhattan;
pub use neighbors::Neighbors;
pub use search::{Algorithm, SearchResult, UnknownAlgorithm};

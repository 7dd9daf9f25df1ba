//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                 |
//! |----------------|--------------------|-----------------------------|
//! | `classifier`   | ImageClassifier    | Pre-labelled camera frames  |
//! | `log_listener` | StatusListener     | `log` facade                |
//! | `memory`       | SecurityRepository | Process memory              |
//! | `storage`      | StoragePort        | In-memory key-value store   |
//! |                | ConfigPort         |                             |
//! | `stored`       | SecurityRepository | Any StoragePort             |

pub mod classifier;
pub mod log_listener;
pub mod memory;
pub mod storage;
pub mod stored;

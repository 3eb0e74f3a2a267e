pub mod model;
pub mod pool;

pub use model::Bid;
pub use pool::BidPool;

pub mod appliance;
pub mod ev;
pub mod household;
pub mod outage;
pub mod price;

pub use appliance::*;
pub use ev::*;
pub use household::*;
pub use outage::*;
pub use price::*;

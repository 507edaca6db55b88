pub mod assign;
pub mod clock;
pub mod metadata;
pub mod scanner;
pub mod wallet_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scanner::WalletScanner;
pub use wallet_cache::WalletCache;

pub mod mock_asset_source;
pub mod test_scene;

pub use mock_asset_source::MockAssetSource;
pub use test_clock::TestClock;
pub use test_scene::{init_logging, TestScene};

pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::GameConfig;
pub use api::events::{GameEvent, PlayerScore};
pub use api::game::{CommandError, FrameContext, Game};
pub use assets::game_data::{GameData, GameDataError};
pub use bridge::protocol::{Decoded, SocketMessage};
pub use bridge::router::{gameboard_router, Outcome, Router};
pub use components::board::Board;
pub use components::end_screen::EndScreen;
pub use components::entity::SceneEntity;
pub use components::status_bar::StatusBar;
pub use components::tile::{Tile, TileState};
pub use core::geometry::Rect;
pub use core::scene::Scene;
pub use renderer::recording::{DrawCall, RecordingPainter};
pub use renderer::traits::{Painter, TextMetrics, TextStyle};
pub use systems::color::{ColorCycle, Rgb};

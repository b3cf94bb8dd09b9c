pub mod analysis;
pub mod archive;
pub mod board;
pub mod error;
pub mod game_data;
pub mod pgn;
pub mod replay;

pub use analysis::{AnalysisPayload, AnalysisResult};
pub use archive::{ArchivePeriod, Username};
pub use error::ModelError;
pub use game_data::{GameSummary, Outcome, PlayerSummary};
pub use replay::ReplayState;

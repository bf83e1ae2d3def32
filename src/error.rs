use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("At least 2 players are required, got {players}")]
    TooFewPlayers { players: u32 },
    #[error("At least 1 court is required")]
    NoCourts,
    #[error("No packing of partner pairs into games was found")]
    NoPacking,
    #[error("Game packing gave up after {attempts} attempts")]
    SearchLimit { attempts: usize },
}

/// Rejects inputs the pipeline cannot schedule.
pub fn check_input(players: u32, courts: usize) -> Result<(), ScheduleError> {
    if players < 2 {
        return Err(ScheduleError::TooFewPlayers { players });
    }
    if courts < 1 {
        return Err(ScheduleError::NoCourts);
    }
    Ok(())
}

//! Background AI player
//!
//! The engine runs on its own thread so a caller (a UI loop, the self-play
//! driver) stays responsive while it thinks. Requests and results travel over
//! channels; at most one search is in flight. A shared stop flag lets the
//! caller cut a search short, in which case the deepest finished iteration
//! is returned.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::game_repr::GameState;
use super::search::{Engine, SearchLimits, SearchProgress, SearchResult};

enum Request {
    Search { state: GameState, limits: SearchLimits },
    Shutdown,
}

/// Messages coming back from the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiEvent {
    Progress(SearchProgress),
    Finished(SearchResult),
}

pub struct AiPlayer {
    config: EngineConfig,
    requests: Sender<Request>,
    events: Receiver<AiEvent>,
    stop: Arc<AtomicBool>,
    thinking: bool,
    worker: Option<JoinHandle<()>>,
}

impl AiPlayer {
    /// Starts the worker thread with an engine built from `config`.
    pub fn spawn(config: EngineConfig) -> Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (event_tx, event_rx) = mpsc::channel::<AiEvent>();
        let engine_config = config.clone();

        let worker = thread::Builder::new()
            .name("chess-ai".into())
            .spawn(move || worker_loop(Engine::new(engine_config), request_rx, event_tx))?;

        Ok(Self {
            config,
            requests: request_tx,
            events: event_rx,
            stop: Arc::new(AtomicBool::new(false)),
            thinking: false,
            worker: Some(worker),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// Starts a search for the side to move in `state`. Returns false when a
    /// search is already running, the game is over, or the worker is gone.
    pub fn request_move(&mut self, state: &GameState) -> bool {
        if self.thinking || state.is_game_over() {
            return false;
        }

        self.stop.store(false, Ordering::Relaxed);
        let limits = SearchLimits::depth(self.config.max_depth)
            .with_time_limit(self.config.time_limit_ms.map(Duration::from_millis))
            .with_stop_flag(Arc::clone(&self.stop));
        let request = Request::Search {
            state: state.clone(),
            limits,
        };

        if self.requests.send(request).is_err() {
            log::error!("AI worker is not running");
            return false;
        }
        self.thinking = true;
        true
    }

    /// Next pending event, without blocking.
    pub fn poll(&mut self) -> Option<AiEvent> {
        match self.events.try_recv() {
            Ok(event) => {
                if matches!(event, AiEvent::Finished(_)) {
                    self.thinking = false;
                }
                Some(event)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.thinking = false;
                None
            }
        }
    }

    /// Blocks until the running search finishes. Progress events received
    /// meanwhile are dropped.
    pub fn wait(&mut self) -> Option<SearchResult> {
        while self.thinking {
            match self.events.recv() {
                Ok(AiEvent::Finished(result)) => {
                    self.thinking = false;
                    return Some(result);
                }
                Ok(AiEvent::Progress(_)) => {}
                Err(_) => self.thinking = false,
            }
        }
        None
    }

    /// Asks the running search to stop. It still reports a result.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for AiPlayer {
    fn drop(&mut self) {
        self.cancel();
        let _ = self.requests.send(Request::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("AI worker panicked");
            }
        }
    }
}

fn worker_loop(mut engine: Engine, requests: Receiver<Request>, events: Sender<AiEvent>) {
    log::debug!("AI worker started");
    for request in requests {
        match request {
            Request::Search { state, limits } => {
                let progress_events = events.clone();
                let result = engine.search(&state, &limits, &mut |event: &SearchProgress| {
                    let _ = progress_events.send(AiEvent::Progress(event.clone()));
                });
                if events.send(AiEvent::Finished(result)).is_err() {
                    break;
                }
            }
            Request::Shutdown => break,
        }
    }
    log::debug!("AI worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(depth: u8) -> AiPlayer {
        AiPlayer::spawn(EngineConfig::default().with_max_depth(depth).with_seed(3)).unwrap()
    }

    #[test]
    fn test_request_and_wait() {
        let mut ai = player(2);
        let state = GameState::initial();
        assert!(ai.request_move(&state));
        assert!(ai.is_thinking());
        assert!(!ai.request_move(&state), "one search at a time");

        let result = ai.wait().unwrap();
        assert!(!ai.is_thinking());
        let mv = result.best_move.unwrap();
        assert!(state.legal_moves().contains(&mv));
        assert_eq!(result.depth, 2);
    }

    #[test]
    fn test_poll_reports_progress_then_result() {
        let mut ai = player(2);
        ai.request_move(&GameState::initial());

        let mut progress = 0;
        let result = loop {
            match ai.poll() {
                Some(AiEvent::Progress(_)) => progress += 1,
                Some(AiEvent::Finished(result)) => break result,
                None => thread::sleep(Duration::from_millis(5)),
            }
        };
        assert!(progress >= 2, "one event per finished depth");
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_cancel_still_returns_a_move() {
        let mut ai = player(20);
        ai.request_move(&GameState::initial());
        thread::sleep(Duration::from_millis(50));
        ai.cancel();
        let result = ai.wait().unwrap();
        assert!(result.best_move.is_some());
        assert!(result.depth < 20);
    }

    #[test]
    fn test_game_over_is_not_searched() {
        let mut ai = player(2);
        let mated = GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert!(!ai.request_move(&mated));
        assert!(ai.wait().is_none());
    }
}

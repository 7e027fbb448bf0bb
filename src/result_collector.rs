use tracing::warn;

use crate::match_runner::MatchResult;

/// Stops pulling match results once more than `crash_limit` of them crashed.
///
/// The result that breaches the limit is still yielded. An error ends the sequence after
/// being yielded.
pub struct BoundedResults<I> {
    games: I,
    crash_limit: u32,
    crashes: u32,
    stopped: bool,
}

impl<I> BoundedResults<I>
where
    I: Iterator<Item = anyhow::Result<MatchResult>>,
{
    /// Collect `games`, tolerating up to `crash_limit` crashes.
    pub fn new(games: I, crash_limit: u32) -> Self {
        BoundedResults {
            games,
            crash_limit,
            crashes: 0,
            stopped: false,
        }
    }

    #[cfg(test)]
    fn crashes(&self) -> u32 {
        self.crashes
    }
}

impl<I> Iterator for BoundedResults<I>
where
    I: Iterator<Item = anyhow::Result<MatchResult>>,
{
    type Item = anyhow::Result<MatchResult>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped {
            return None;
        }
        let item = self.games.next();
        match &item {
            None | Some(Err(_)) => self.stopped = true,
            Some(Ok(result)) => {
                if result.crashed {
                    self.crashes += 1;
                }
                if self.crashes > self.crash_limit {
                    warn!(
                        crashes = self.crashes,
                        crash_limit = self.crash_limit,
                        "crash limit exceeded, stopping early"
                    );
                    self.stopped = true;
                }
            }
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::agent_lifecycle::tests::{agent_log, board, reset_agent_log, FakeFactory};
    use crate::agent_lifecycle::AgentLifecycleStream;
    use crate::configuration::Configuration;
    use crate::game_interface::GameFactory;
    use crate::map_stream::MapStream;
    use crate::match_runner::MatchRunner;

    fn ok(crashed: bool) -> anyhow::Result<MatchResult> {
        Ok(MatchResult::new(crashed, 0, 1))
    }

    #[test]
    fn stops_after_breaching_result() {
        let pulled = Cell::new(0);
        let games = std::iter::repeat_with(|| {
            pulled.set(pulled.get() + 1);
            ok(true)
        });
        let results = BoundedResults::new(games, 2)
            .collect::<anyhow::Result<Vec<_>>>()
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.crashed));
        assert_eq!(pulled.get(), 3);
    }

    #[test]
    fn crash_count_equal_to_limit_keeps_going() {
        let games = vec![ok(true), ok(false), ok(true), ok(false)].into_iter();
        let mut collector = BoundedResults::new(games, 2);
        assert_eq!(collector.by_ref().count(), 4);
        assert_eq!(collector.crashes(), 2);
    }

    #[test]
    fn zero_crash_limit_stops_at_first_crash() {
        let games = vec![ok(false), ok(true), ok(false)].into_iter();
        assert_eq!(BoundedResults::new(games, 0).count(), 2);
    }

    #[test]
    fn error_ends_the_sequence() {
        let games = vec![ok(false), Err(anyhow::anyhow!("boom")), ok(false)].into_iter();
        let mut collector = BoundedResults::new(games, 5);
        assert!(collector.next().unwrap().is_ok());
        assert!(collector.next().unwrap().is_err());
        assert!(collector.next().is_none());
    }

    #[test]
    fn games_count_caps_boards_consumed() {
        reset_agent_log();
        let factory = FakeFactory { boards: vec![] };
        let config = Configuration::new();
        let boards_pulled = Cell::new(0);
        let maps = MapStream::new(factory.new_generator(&config)).inspect(|_| {
            boards_pulled.set(boards_pulled.get() + 1);
        });
        let games =
            AgentLifecycleStream::new("agent", maps, &factory, MatchRunner::Batch).take(4);

        let results = BoundedResults::new(games, 10)
            .collect::<anyhow::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(boards_pulled.get(), 4);
        assert_eq!(agent_log().disposed, vec![1]);
    }

    #[test]
    fn three_crashes_with_limit_two() {
        reset_agent_log();
        let factory = FakeFactory {
            boards: vec![board(2, true), board(3, true), board(4, true), board(5, false)],
        };
        let maps = MapStream::new(factory.new_generator(&Configuration::new()));
        let games =
            AgentLifecycleStream::new("agent", maps, &factory, MatchRunner::Batch).take(100);

        let results = BoundedResults::new(games, 2)
            .collect::<anyhow::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(
            results.iter().map(|r| r.step_count).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        let log = agent_log();
        assert_eq!(log.launched, 3);
        assert_eq!(log.disposed, vec![1, 2, 3]);
    }
}

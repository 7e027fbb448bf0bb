use crate::game_interface::BoardGenerator;

/// Infinite lazy stream of boards. Each call to `next` generates exactly one board.
pub struct MapStream<G: BoardGenerator> {
    generator: G,
}

impl<G: BoardGenerator> MapStream<G> {
    /// Stream boards from `generator`.
    pub fn new(generator: G) -> Self {
        MapStream { generator }
    }
}

impl<G: BoardGenerator> Iterator for MapStream<G> {
    type Item = G::Board;

    fn next(&mut self) -> Option<G::Board> {
        Some(self.generator.generate_board())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    struct SpyGenerator {
        calls: Rc<Cell<u32>>,
    }

    impl BoardGenerator for SpyGenerator {
        type Board = u32;

        fn generate_board(&mut self) -> u32 {
            self.calls.set(self.calls.get() + 1);
            self.calls.get() * 10
        }
    }

    #[test]
    fn boards_are_generated_on_demand() {
        let calls = Rc::new(Cell::new(0));
        let mut maps = MapStream::new(SpyGenerator {
            calls: calls.clone(),
        });
        assert_eq!(calls.get(), 0);

        let boards = maps.by_ref().take(3).collect::<Vec<_>>();
        assert_eq!(boards, vec![10, 20, 30]);
        assert_eq!(calls.get(), 3);

        assert_eq!(maps.next(), Some(40));
        assert_eq!(calls.get(), 4);
    }
}

use crate::games::RandomSource;
use super::food::FoodPlacer;
use super::types::{Direction, FieldSize, Point, RunStatus};

/// One immutable snapshot of the board.
///
/// `body` is head-first and never empty. While the status is `Running` the
/// food cell is not part of the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeGameState {
    body: Vec<Point>,
    food: Point,
    status: RunStatus,
}

impl SnakeGameState {
    pub fn new(body: Vec<Point>, food: Point) -> Self {
        Self::with_status(body, food, RunStatus::Running)
    }

    pub fn with_status(body: Vec<Point>, food: Point, status: RunStatus) -> Self {
        assert!(!body.is_empty(), "snake body must not be empty");
        Self { body, food, status }
    }

    pub fn body(&self) -> &[Point] {
        &self.body
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    fn finished(&self, status: RunStatus) -> Self {
        Self::with_status(self.body.clone(), self.food, status)
    }

    /// Advances the game by one tick.
    ///
    /// Only valid while the game is running; callers gate on `status()`.
    pub fn next<R: RandomSource>(
        &self,
        direction: Direction,
        field: &FieldSize,
        food_placer: &mut FoodPlacer,
        rng: &mut R,
    ) -> SnakeGameState {
        assert!(
            self.status.is_running(),
            "next() called on a finished game ({:?})",
            self.status
        );

        let new_head = self.head().offset(direction);
        if !field.contains(new_head) {
            return self.finished(RunStatus::Lost);
        }

        // The tail cell is vacated by this move, so running into it is fine.
        let len = self.body.len();
        let hits_itself = self
            .body
            .iter()
            .skip(1)
            .take(len.saturating_sub(2))
            .any(|segment| *segment == new_head);
        if hits_itself {
            return self.finished(RunStatus::Lost);
        }

        if new_head == self.food {
            let mut grown = Vec::with_capacity(len + 1);
            grown.push(new_head);
            grown.extend_from_slice(&self.body);

            assert!(
                grown.len() <= field.area(),
                "snake of length {} does not fit a {}x{} field",
                grown.len(),
                field.width,
                field.height
            );
            if grown.len() == field.area() {
                // The winning frame keeps showing the board as it was before the last bite.
                return self.finished(RunStatus::Won);
            }

            let food = food_placer.place(field, &grown, rng);
            return SnakeGameState::new(grown, food);
        }

        let mut moved = Vec::with_capacity(len);
        moved.push(new_head);
        moved.extend_from_slice(&self.body[..len - 1]);
        SnakeGameState::new(moved, self.food)
    }
}

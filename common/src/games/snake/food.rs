use crate::games::RandomSource;
use super::types::{FieldSize, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachedFood {
    pub snake_len: usize,
    pub position: Point,
}

/// Picks food cells for one session.
///
/// A placement is remembered together with the snake length it was computed
/// for. Asking again with a body of that same length returns the remembered
/// cell without drawing from the random source. The engine recomputes food
/// exactly once per length value, so the cached answer is only ever reused for
/// the same growth event.
#[derive(Clone, Debug, Default)]
pub struct FoodPlacer {
    cached: Option<CachedFood>,
}

impl FoodPlacer {
    pub fn new() -> Self {
        Self { cached: None }
    }

    pub fn cached(&self) -> Option<CachedFood> {
        self.cached
    }

    pub fn place<R: RandomSource>(
        &mut self,
        field: &FieldSize,
        body: &[Point],
        rng: &mut R,
    ) -> Point {
        if let Some(cached) = self.cached
            && cached.snake_len == body.len()
        {
            return cached.position;
        }

        let position = random_free_cell(field, body, rng);
        self.cached = Some(CachedFood {
            snake_len: body.len(),
            position,
        });
        position
    }
}

/// Uniform pick among cells not covered by `occupied`.
///
/// Panics when every cell is occupied.
pub fn random_free_cell<R: RandomSource>(
    field: &FieldSize,
    occupied: &[Point],
    rng: &mut R,
) -> Point {
    let free: Vec<Point> = field.cells().filter(|p| !occupied.contains(p)).collect();
    assert!(
        !free.is_empty(),
        "no free cell left on a {}x{} field",
        field.width,
        field.height
    );
    free[rng.random_range(0..free.len())]
}

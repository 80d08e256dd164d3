use embedded_graphics::Drawable;
use embedded_graphics::geometry::Point as CanvasPoint;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use image::{Rgb, RgbImage};

use crate::config::GameConfig;
use crate::games::snake::{FieldSize, RunStatus, SnakeGameState};
use super::canvas::Canvas;

pub const FOOD_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const HEAD_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
pub const BODY_COLOR: Rgb<u8> = Rgb([128, 128, 128]);
pub const BACKGROUND_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
pub const WON_CAPTION_COLOR: Rgb888 = Rgb888::new(0, 255, 0);
pub const LOST_CAPTION_COLOR: Rgb888 = Rgb888::new(255, 0, 0);

pub const WON_CAPTION: &str = "You won !";
pub const LOST_CAPTION: &str = "You lost...";

/// Turns game states into fixed-size raster frames.
#[derive(Clone, Debug)]
pub struct FrameRenderer {
    field: FieldSize,
    tile_size: u32,
    max_frames: usize,
}

impl FrameRenderer {
    pub fn new(field: FieldSize, tile_size: u32, max_frames: usize) -> Self {
        Self {
            field,
            tile_size,
            max_frames,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.field_size(),
            config.animation.tile_size,
            config.max_frames(),
        )
    }

    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    pub fn frame_width(&self) -> u32 {
        self.field.width as u32 * self.tile_size
    }

    pub fn frame_height(&self) -> u32 {
        self.field.height as u32 * self.tile_size
    }

    /// The states that make it into an animation: at most `max_frames` of
    /// them, taken from the end so the last frame is always the final tick.
    pub fn frame_window<'a>(&self, states: &'a [SnakeGameState]) -> &'a [SnakeGameState] {
        let skip = states.len().saturating_sub(self.max_frames);
        &states[skip..]
    }

    pub fn render_all(&self, states: &[SnakeGameState]) -> Vec<RgbImage> {
        self.frame_window(states)
            .iter()
            .map(|state| self.render(state))
            .collect()
    }

    pub fn render(&self, state: &SnakeGameState) -> RgbImage {
        let cell_colors = self.cell_colors(state);
        let width = self.field.width;
        let tile = self.tile_size;

        let mut image = RgbImage::new(self.frame_width(), self.frame_height());
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let cell = (y / tile) as usize * width + (x / tile) as usize;
            *pixel = cell_colors[cell];
        }

        match state.status() {
            RunStatus::Won => self.draw_caption(&mut image, WON_CAPTION, WON_CAPTION_COLOR),
            RunStatus::Lost => self.draw_caption(&mut image, LOST_CAPTION, LOST_CAPTION_COLOR),
            RunStatus::Running => {}
        }
        image
    }

    fn cell_colors(&self, state: &SnakeGameState) -> Vec<Rgb<u8>> {
        let mut colors = vec![BACKGROUND_COLOR; self.field.area()];
        let index = |x: i32, y: i32| y as usize * self.field.width + x as usize;

        for segment in state.body().iter().skip(1) {
            if self.field.contains(*segment) {
                colors[index(segment.x, segment.y)] = BODY_COLOR;
            }
        }
        let head = state.head();
        if self.field.contains(head) {
            colors[index(head.x, head.y)] = HEAD_COLOR;
        }
        let food = state.food();
        if self.field.contains(food) {
            colors[index(food.x, food.y)] = FOOD_COLOR;
        }
        colors
    }

    fn draw_caption(&self, image: &mut RgbImage, caption: &str, color: Rgb888) {
        let center = CanvasPoint::new(
            (self.frame_width() / 2) as i32,
            (self.frame_height() / 2) as i32,
        );
        let character_style = MonoTextStyle::new(&FONT_6X10, color);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        let mut canvas = Canvas::new(image);
        let Ok(_) = Text::with_text_style(caption, center, character_style, text_style)
            .draw(&mut canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::games::snake::Point;
    use embedded_graphics::pixelcolor::RgbColor;

    fn renderer() -> FrameRenderer {
        FrameRenderer::new(FieldSize::new(25, 15), 10, 25)
    }

    fn running(x: i32) -> SnakeGameState {
        SnakeGameState::new(vec![Point::new(x, 7)], Point::new(0, 0))
    }

    fn caption_pixels(image: &RgbImage, color: Rgb888) -> usize {
        let wanted = Rgb([color.r(), color.g(), color.b()]);
        let mut count = 0;
        for y in 60..90 {
            for x in 80..170 {
                if *image.get_pixel(x, y) == wanted {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_frame_size_follows_tiles() {
        let image = renderer().render(&running(3));
        assert_eq!(image.dimensions(), (250, 150));
    }

    #[test]
    fn test_cells_are_painted_as_tiles() {
        let state = SnakeGameState::new(
            vec![Point::new(3, 2), Point::new(4, 2)],
            Point::new(10, 10),
        );
        let image = renderer().render(&state);

        assert_eq!(image.get_pixel(30, 20), &HEAD_COLOR);
        assert_eq!(image.get_pixel(39, 29), &HEAD_COLOR);
        assert_eq!(image.get_pixel(45, 25), &BODY_COLOR);
        assert_eq!(image.get_pixel(105, 105), &FOOD_COLOR);
        assert_eq!(image.get_pixel(0, 0), &BACKGROUND_COLOR);
        assert_eq!(image.get_pixel(249, 149), &BACKGROUND_COLOR);
    }

    #[test]
    fn test_running_frame_has_no_caption() {
        let image = renderer().render(&SnakeGameState::new(
            vec![Point::new(0, 14)],
            Point::new(24, 0),
        ));
        assert_eq!(caption_pixels(&image, LOST_CAPTION_COLOR), 0);
        assert_eq!(caption_pixels(&image, WON_CAPTION_COLOR), 0);
    }

    #[test]
    fn test_lost_frame_has_red_caption() {
        let state = SnakeGameState::with_status(
            vec![Point::new(0, 14)],
            Point::new(24, 0),
            RunStatus::Lost,
        );
        let image = renderer().render(&state);
        assert!(caption_pixels(&image, LOST_CAPTION_COLOR) > 0);
        assert_eq!(caption_pixels(&image, WON_CAPTION_COLOR), 0);
    }

    #[test]
    fn test_won_frame_has_green_caption() {
        let state = SnakeGameState::with_status(
            vec![Point::new(0, 14)],
            Point::new(24, 0),
            RunStatus::Won,
        );
        let image = renderer().render(&state);
        assert!(caption_pixels(&image, WON_CAPTION_COLOR) > 0);
    }

    #[test]
    fn test_render_all_one_frame_per_state() {
        let states: Vec<SnakeGameState> = (0..5).map(running).collect();
        assert_eq!(renderer().render_all(&states).len(), 5);
    }

    #[test]
    fn test_render_all_keeps_latest_window() {
        let renderer = FrameRenderer::new(FieldSize::new(25, 15), 10, 4);
        let states: Vec<SnakeGameState> = (0..10).map(running).collect();

        let window = renderer.frame_window(&states);
        assert_eq!(window.len(), 4);
        assert_eq!(window[0], running(6));
        assert_eq!(window[3], running(9));
        assert_eq!(renderer.render_all(&states).len(), 4);
    }

    #[test]
    fn test_render_all_never_exceeds_cap() {
        let renderer = renderer();
        for len in [0usize, 1, 24, 25, 26, 80] {
            let states: Vec<SnakeGameState> = (0..len).map(|i| running((i % 25) as i32)).collect();
            assert!(renderer.render_all(&states).len() <= renderer.max_frames());
            assert_eq!(renderer.render_all(&states).len(), len.min(25));
        }
    }
}

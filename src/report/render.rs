// src/report/render.rs
//
// Annotated heatmap: title on top, driver names left of the grid, circuit
// names under it (rotated 90°), colour bar on the right. Text needs a
// TrueType font; without one the grid and colour bar are still drawn.

use std::fs;

use ab_glyph::{FontVec, PxScale};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use super::matrix::SeasonWinMatrix;
use crate::config::consts::{
    CELL_H, CELL_PX, CELL_W, COLORBAR_W, FONT_CANDIDATES, LABEL_PX, MARGIN, TITLE_PX,
};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([30, 30, 30, 255]);
const GRID_LINE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FALLBACK_LABEL_W: u32 = 160;
const FALLBACK_LABEL_H: u32 = 120;
const GAP: u32 = 8;

// Yellow → green → blue, light to dark.
const YLGNBU: [[u8; 3]; 9] = [
    [0xff, 0xff, 0xd9],
    [0xed, 0xf8, 0xb1],
    [0xc7, 0xe9, 0xb4],
    [0x7f, 0xcd, 0xbb],
    [0x41, 0xb6, 0xc4],
    [0x1d, 0x91, 0xc0],
    [0x22, 0x5e, 0xa8],
    [0x25, 0x34, 0x94],
    [0x08, 0x1d, 0x58],
];

/// First loadable font from the candidate list.
pub fn load_font() -> Option<FontVec> {
    FONT_CANDIDATES.iter().find_map(|p| {
        let bytes = fs::read(p).ok()?;
        FontVec::try_from_vec(bytes).ok()
    })
}

/// Colour for `t` in [0, 1] (clamped).
pub fn colormap(t: f32) -> Rgba<u8> {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let pos = t * (YLGNBU.len() - 1) as f32;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(YLGNBU.len() - 1);
    let frac = pos - lo as f32;
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * frac).round() as u8;
    let (a, b) = (YLGNBU[lo], YLGNBU[hi]);
    Rgba([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), 255])
}

fn intensity(count: u32, max: u32) -> f32 {
    count as f32 / max.max(1) as f32
}

/// Readable text colour on top of `t`-intensity cells.
fn ink_for(t: f32) -> Rgba<u8> {
    if t > 0.55 { WHITE } else { INK }
}

struct Text<'a> {
    font: &'a FontVec,
}

impl Text<'_> {
    fn size(&self, px: f32, s: &str) -> (u32, u32) {
        text_size(PxScale::from(px), self.font, s)
    }

    fn draw(&self, img: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, px: f32, s: &str) {
        draw_text_mut(img, color, x, y, PxScale::from(px), self.font, s);
    }

    fn draw_centered(&self, img: &mut RgbaImage, color: Rgba<u8>, cx: i32, cy: i32, px: f32, s: &str) {
        let (w, h) = self.size(px, s);
        self.draw(img, color, cx - w as i32 / 2, cy - h as i32 / 2, px, s);
    }

    /// Text reading bottom-to-top; (x, y) is the top-left of the rotated box.
    fn draw_vertical(&self, img: &mut RgbaImage, x: i64, y: i64, px: f32, s: &str) {
        let (w, h) = self.size(px, s);
        let mut tmp = RgbaImage::from_pixel(w + 2, h + 4, WHITE);
        self.draw(&mut tmp, INK, 1, 0, px, s);
        let rotated = imageops::rotate270(&tmp);
        imageops::overlay(img, &rotated, x, y);
    }
}

/// Render `m` into a new image. `title` goes on top.
pub fn render_heatmap(m: &SeasonWinMatrix, title: &str, font: Option<&FontVec>) -> RgbaImage {
    let text = font.map(|font| Text { font });

    let row_label_w = match &text {
        Some(t) => m.drivers.iter().map(|d| t.size(LABEL_PX, d).0).max().unwrap_or(0),
        None => FALLBACK_LABEL_W,
    };
    let col_label_h = match &text {
        Some(t) => m.circuits.iter().map(|c| t.size(LABEL_PX, c).0).max().unwrap_or(0),
        None => FALLBACK_LABEL_H,
    };
    let axis_px = LABEL_PX as u32 + GAP;

    let grid_w = CELL_W * m.cols().max(1) as u32;
    let grid_h = CELL_H * m.rows().max(1) as u32;

    let x0 = MARGIN + axis_px + row_label_w + GAP;
    let y0 = MARGIN + TITLE_PX as u32 + 2 * GAP;

    let bar_x = x0 + grid_w + 2 * MARGIN;
    let tick_w = text.as_ref().map(|t| t.size(LABEL_PX, &m.max_count().to_string()).0).unwrap_or(16);
    let title_w = text.as_ref().map(|t| t.size(TITLE_PX, title).0 + 2 * MARGIN).unwrap_or(0);
    let width = (bar_x + COLORBAR_W + GAP + tick_w + GAP + axis_px + MARGIN).max(title_w);
    let height = y0 + grid_h + GAP + col_label_h + GAP + axis_px + MARGIN;

    let mut img = RgbaImage::from_pixel(width, height, WHITE);
    let max = m.max_count();

    // Cells
    for row in 0..m.rows() {
        for col in 0..m.cols() {
            let count = m.cell(row, col);
            let t = intensity(count, max);
            let x = (x0 + col as u32 * CELL_W) as i32;
            let y = (y0 + row as u32 * CELL_H) as i32;
            draw_filled_rect_mut(&mut img, Rect::at(x, y).of_size(CELL_W, CELL_H), colormap(t));
            draw_hollow_rect_mut(&mut img, Rect::at(x, y).of_size(CELL_W, CELL_H), GRID_LINE);
            if let Some(tx) = &text {
                let cx = x + CELL_W as i32 / 2;
                let cy = y + CELL_H as i32 / 2;
                tx.draw_centered(&mut img, ink_for(t), cx, cy, CELL_PX, &count.to_string());
            }
        }
    }

    // Colour bar, dark at the top.
    for dy in 0..grid_h {
        let t = 1.0 - dy as f32 / grid_h.saturating_sub(1).max(1) as f32;
        let rect = Rect::at(bar_x as i32, (y0 + dy) as i32).of_size(COLORBAR_W, 1);
        draw_filled_rect_mut(&mut img, rect, colormap(t));
    }
    draw_hollow_rect_mut(&mut img, Rect::at(bar_x as i32, y0 as i32).of_size(COLORBAR_W, grid_h), INK);

    let Some(tx) = text else {
        return img;
    };

    tx.draw_centered(&mut img, INK, (width / 2) as i32, (MARGIN + TITLE_PX as u32 / 2) as i32, TITLE_PX, title);

    for (row, driver) in m.drivers.iter().enumerate() {
        let (w, h) = tx.size(LABEL_PX, driver);
        let x = x0 as i32 - GAP as i32 - w as i32;
        let y = (y0 + row as u32 * CELL_H + CELL_H / 2) as i32 - h as i32 / 2;
        tx.draw(&mut img, INK, x, y, LABEL_PX, driver);
    }

    for (col, circuit) in m.circuits.iter().enumerate() {
        let (_, h) = tx.size(LABEL_PX, circuit);
        // After rotation the box is (h + 4) wide and (w + 2) tall, hanging from the grid.
        let x = (x0 + col as u32 * CELL_W + CELL_W / 2) as i64 - (h as i64 + 4) / 2;
        let y = (y0 + grid_h + GAP) as i64;
        tx.draw_vertical(&mut img, x, y, LABEL_PX, circuit);
    }

    // Axis titles
    let (cw, _) = tx.size(LABEL_PX, "Circuit");
    tx.draw(
        &mut img,
        INK,
        (x0 + grid_w / 2) as i32 - cw as i32 / 2,
        (y0 + grid_h + GAP + col_label_h + GAP) as i32,
        LABEL_PX,
        "Circuit",
    );
    let (dw, _) = tx.size(LABEL_PX, "Driver");
    tx.draw_vertical(&mut img, MARGIN as i64, (y0 + grid_h / 2) as i64 - dw as i64 / 2, LABEL_PX, "Driver");

    // Colour bar ticks + label
    let tick_x = (bar_x + COLORBAR_W + GAP) as i32;
    for value in [0, max] {
        let t = intensity(value, max);
        let y = (y0 as f32 + (1.0 - t) * grid_h.saturating_sub(1) as f32) as i32;
        let label = value.to_string();
        let (_, h) = tx.size(LABEL_PX, &label);
        tx.draw(&mut img, INK, tick_x, y - h as i32 / 2, LABEL_PX, &label);
    }
    let bar_label = "Number of Wins";
    let (bw, _) = tx.size(LABEL_PX, bar_label);
    tx.draw_vertical(
        &mut img,
        (tick_x as u32 + tick_w + GAP) as i64,
        (y0 + grid_h / 2) as i64 - bw as i64 / 2,
        LABEL_PX,
        bar_label,
    );

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DriverRaceRecord;

    fn matrix() -> SeasonWinMatrix {
        let mk = |race: &str, driver: &str| DriverRaceRecord {
            year: 2000,
            race_name: s!(race),
            driver_name: s!(driver),
            driver_id: s!(),
            team: s!(),
            position: 1,
            points: 10.0,
            grid_position: 1,
            status: s!(),
            nationality: s!(),
        };
        let recs = [mk("R1", "A"), mk("R2", "A"), mk("R3", "B")];
        let rows: Vec<&DriverRaceRecord> = recs.iter().collect();
        SeasonWinMatrix::build(2000, &rows, 5)
    }

    #[test]
    fn colormap_endpoints() {
        assert_eq!(colormap(0.0), Rgba([0xff, 0xff, 0xd9, 255]));
        assert_eq!(colormap(1.0), Rgba([0x08, 0x1d, 0x58, 255]));
        assert_eq!(colormap(7.0), colormap(1.0));
        assert_eq!(colormap(f32::NAN), colormap(0.0));
    }

    #[test]
    fn darker_means_more_wins() {
        let lum = |c: Rgba<u8>| c.0[0] as u32 + c.0[1] as u32 + c.0[2] as u32;
        assert!(lum(colormap(0.25)) > lum(colormap(0.75)));
    }

    #[test]
    fn unlabelled_render_colours_cells_by_count() {
        let m = matrix();
        let img = render_heatmap(&m, "t", None);

        let x0 = MARGIN + LABEL_PX as u32 + GAP + FALLBACK_LABEL_W + GAP;
        let y0 = MARGIN + TITLE_PX as u32 + 2 * GAP;
        // Centre of (A, R1): one win = max → darkest colour.
        let a_r1 = *img.get_pixel(x0 + CELL_W / 2, y0 + CELL_H / 2);
        // Centre of (A, R3): zero wins → lightest colour.
        let a_r3 = *img.get_pixel(x0 + 2 * CELL_W + CELL_W / 2, y0 + CELL_H / 2);
        assert_eq!(a_r1, colormap(1.0));
        assert_eq!(a_r3, colormap(0.0));
        assert!(img.width() > x0 + 3 * CELL_W);
        assert!(img.height() > y0 + 2 * CELL_H);
    }
}

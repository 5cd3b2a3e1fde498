use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use itertools::Itertools;
use line_drawing::{Bresenham, XiaolinWu};
use log::warn;
use once_cell::sync::Lazy;
use rusttype::{Font, Scale};

use crate::{error::Result, lin_reg::LinearRegression};

pub const X_BOUNDS: Bounds = Bounds { min: 2.0, max: 20.0 };
pub const Y_BOUNDS: Bounds = Bounds { min: 2.0, max: 14.0 };

/// 5 inch at 100 dpi.
pub const DEFAULT_SIZE: u32 = 500;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const FRAME: Rgb<u8> = Rgb([0, 0, 0]);
pub const TEXT: Rgb<u8> = Rgb([0, 0, 0]);
pub const FIT_LINE: Rgb<u8> = Rgb([31, 119, 180]);
pub const POINT: Rgb<u8> = Rgb([214, 39, 40]);
const TICK_LENGTH: f64 = 5.0;

static FONT: Lazy<Option<Font<'static>>> =
    Lazy::new(|| Font::try_from_bytes(include_bytes!("../assets/DejaVuSans.ttf")));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    fn ticks(&self, step: f64) -> Vec<f64> {
        if step <= 0.0 {
            return Vec::new();
        }
        (0..)
            .map(|i| self.min + i as f64 * step)
            .take_while(|value| *value <= self.max + step * 1e-9)
            .collect_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub x: Bounds,
    pub y: Bounds,
    pub point_radius: f64,
    pub tick_step: f64,
}

impl PlotStyle {
    /// Square image of `size` pixels with margin and marker size scaled to it.
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            margin: size * 2 / 25,
            x: X_BOUNDS,
            y: Y_BOUNDS,
            point_radius: size as f64 / 120.0,
            tick_step: 2.0,
        }
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self::square(DEFAULT_SIZE)
    }
}

pub struct ScatterPlot<'a> {
    title: Option<&'a str>,
    xs: &'a [f64],
    ys: &'a [f64],
    fit: Option<LinearRegression>,
    style: PlotStyle,
}

impl<'a> ScatterPlot<'a> {
    pub fn new(xs: &'a [f64], ys: &'a [f64], style: PlotStyle) -> Self {
        Self {
            title: None,
            xs,
            ys,
            fit: None,
            style,
        }
    }

    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_fit(mut self, fit: &LinearRegression) -> Self {
        self.fit = Some(*fit);
        self
    }

    /// Maps data coordinates to pixel coordinates, y pointing down.
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let style = &self.style;
        let inner_width = style.width.saturating_sub(2 * style.margin) as f64;
        let inner_height = style.height.saturating_sub(2 * style.margin) as f64;
        (
            style.margin as f64 + (x - style.x.min) / style.x.span() * inner_width,
            style.height.saturating_sub(style.margin) as f64
                - (y - style.y.min) / style.y.span() * inner_height,
        )
    }

    pub fn render(&self) -> RgbImage {
        let style = &self.style;
        let mut img = RgbImage::from_pixel(style.width, style.height, BACKGROUND);

        let (left, top) = self.to_pixel(style.x.min, style.y.max);
        let (right, bottom) = self.to_pixel(style.x.max, style.y.min);

        for x in style.x.ticks(style.tick_step) {
            let (px, _) = self.to_pixel(x, style.y.min);
            draw_segment(&mut img, (px, top), (px, bottom), GRID);
            draw_segment(&mut img, (px, bottom), (px, bottom + TICK_LENGTH), FRAME);
        }
        for y in style.y.ticks(style.tick_step) {
            let (_, py) = self.to_pixel(style.x.min, y);
            draw_segment(&mut img, (left, py), (right, py), GRID);
            draw_segment(&mut img, (left - TICK_LENGTH, py), (left, py), FRAME);
        }

        draw_segment(&mut img, (left, top), (right, top), FRAME);
        draw_segment(&mut img, (right, top), (right, bottom), FRAME);
        draw_segment(&mut img, (right, bottom), (left, bottom), FRAME);
        draw_segment(&mut img, (left, bottom), (left, top), FRAME);

        if let Some(fit) = self.fit.as_ref() {
            self.draw_fit(&mut img, fit);
        }

        for (x, y) in self.xs.iter().zip(self.ys) {
            if !(style.x.contains(*x) && style.y.contains(*y)) {
                continue;
            }
            fill_disk(&mut img, self.to_pixel(*x, *y), style.point_radius, POINT);
        }

        self.draw_labels(&mut img);
        img
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.render().save(path)?;
        Ok(())
    }

    /// Title centred above the plot area, "X" below it and "Y" left of it.
    fn draw_labels(&self, img: &mut RgbImage) {
        let Some(font) = FONT.as_ref() else {
            warn!("plot font could not be loaded, drawing without text");
            return;
        };
        let margin = self.style.margin as f32;
        let (left, top) = self.to_pixel(self.style.x.min, self.style.y.max);
        let (right, bottom) = self.to_pixel(self.style.x.max, self.style.y.min);
        let center_x = ((left + right) / 2.0) as i32;
        let center_y = ((top + bottom) / 2.0) as i32;

        if let Some(title) = self.title {
            let scale = Scale::uniform(margin * 0.5);
            let (width, height) = text_size(scale, font, title);
            let y = ((top as i32 - height) / 2).max(0);
            draw_text_mut(img, TEXT, center_x - width / 2, y, scale, font, title);
        }

        let scale = Scale::uniform(margin * 0.45);
        let (width, height) = text_size(scale, font, "X");
        let below_ticks = bottom as i32 + TICK_LENGTH as i32 + 2;
        let y = below_ticks + (img.height() as i32 - below_ticks - height) / 2;
        draw_text_mut(img, TEXT, center_x - width / 2, y, scale, font, "X");

        let (width, height) = text_size(scale, font, "Y");
        let left_of_ticks = left as i32 - TICK_LENGTH as i32 - 2;
        let x = ((left_of_ticks - width) / 2).max(0);
        draw_text_mut(img, TEXT, x, center_y - height / 2, scale, font, "Y");
    }

    fn draw_fit(&self, img: &mut RgbImage, fit: &LinearRegression) {
        let Some((x_start, x_end)) = visible_range(fit, &self.style.x, &self.style.y) else {
            return;
        };
        let start = self.to_pixel(x_start, fit.predict(x_start));
        let end = self.to_pixel(x_end, fit.predict(x_end));
        for ((x, y), strength) in XiaolinWu::<f64, i64>::new(start, end) {
            blend(img, x, y, FIT_LINE, strength);
        }
    }
}

/// Part of `[x.min, x.max]` where the fitted line stays within the y bounds.
fn visible_range(fit: &LinearRegression, x: &Bounds, y: &Bounds) -> Option<(f64, f64)> {
    if fit.slope == 0.0 {
        return y.contains(fit.intercept).then_some((x.min, x.max));
    }
    let at_min = (y.min - fit.intercept) / fit.slope;
    let at_max = (y.max - fit.intercept) / fit.slope;
    let start = x.min.max(at_min.min(at_max));
    let end = x.max.min(at_min.max(at_max));
    (start <= end).then_some((start, end))
}

fn inside(img: &RgbImage, x: i64, y: i64) -> Option<(u32, u32)> {
    let x = u32::try_from(x).ok().filter(|x| *x < img.width())?;
    let y = u32::try_from(y).ok().filter(|y| *y < img.height())?;
    Some((x, y))
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if let Some((x, y)) = inside(img, x, y) {
        img.put_pixel(x, y, color);
    }
}

fn blend(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>, strength: f64) {
    let Some((x, y)) = inside(img, x, y) else {
        return;
    };
    let strength = strength.clamp(0.0, 1.0);
    let pixel = img.get_pixel_mut(x, y);
    for (channel, target) in pixel.0.iter_mut().zip(color.0) {
        *channel = (*channel as f64 * (1.0 - strength) + target as f64 * strength).round() as u8;
    }
}

fn draw_segment(img: &mut RgbImage, start: (f64, f64), end: (f64, f64), color: Rgb<u8>) {
    let start = (start.0.round() as i64, start.1.round() as i64);
    let end = (end.0.round() as i64, end.1.round() as i64);
    for (x, y) in Bresenham::new(start, end) {
        put(img, x, y, color);
    }
}

fn fill_disk(img: &mut RgbImage, center: (f64, f64), radius: f64, color: Rgb<u8>) {
    let reach = radius.ceil() as i64;
    let (cx, cy) = (center.0.round() as i64, center.1.round() as i64);
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            let (x, y) = (cx + dx, cy + dy);
            let (fx, fy) = (x as f64 - center.0, y as f64 - center.1);
            if fx * fx + fy * fy <= radius * radius {
                put(img, x, y, color);
            }
        }
    }
}

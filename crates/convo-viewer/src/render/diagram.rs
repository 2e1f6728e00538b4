//! Canvas rendering of the laid-out tree.
//!
//! World coordinates grow downward and the canvas grows upward, so every
//! point goes through [`ViewTransform::to_canvas`]. The whole diagram is
//! repainted on each draw.

use convo_tree::{wrap_words, TreeLayout};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle},
        Block, Borders,
    },
    Frame,
};

use super::empty_pane;
use crate::app::{LoadedTree, TreeView, Viewport};

const ROOT_RADIUS: f64 = 15.0;
const RETICLE_ARM: f64 = 30.0;
/// Rows of space kept above the root when nothing is panned.
const TOP_MARGIN_ROWS: f64 = 2.0;

pub(super) fn render(frame: &mut Frame, area: Rect, view: &TreeView) {
    let block = Block::default()
        .title(" Diagram ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let Some(loaded) = &view.loaded else {
        let message = if view.loading { "Fetching tree..." } else { "No tree loaded." };
        empty_pane(frame, area, block, message);
        return;
    };

    let inner = block.inner(area);
    let transform = ViewTransform::new(&view.viewport, inner.width, inner.height);
    let (x_bounds, y_bounds) = transform.bounds();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            paint_reticle(ctx, &transform);
            paint_tree(ctx, loaded, &transform);
        });
    frame.render_widget(canvas, area);
}

/// Maps world coordinates to canvas coordinates for one frame.
#[derive(Debug, Clone, Copy)]
struct ViewTransform {
    pan_x: f64,
    pan_y: f64,
    cell_width: f64,
    width: f64,
    height: f64,
    top_margin: f64,
}

impl ViewTransform {
    fn new(viewport: &Viewport, columns: u16, rows: u16) -> Self {
        let (cell_width, cell_height) = viewport.cell_size();
        Self {
            pan_x: viewport.pan_x,
            pan_y: viewport.pan_y,
            cell_width,
            width: f64::from(columns) * cell_width,
            height: f64::from(rows) * cell_height,
            top_margin: TOP_MARGIN_ROWS * cell_height,
        }
    }

    /// Visible canvas window, root horizontally centered near the top.
    fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        (
            [-self.width / 2.0, self.width / 2.0],
            [self.top_margin - self.height, self.top_margin],
        )
    }

    fn to_canvas(&self, x: f64, y: f64) -> (f64, f64) {
        (x + self.pan_x, -(y + self.pan_y))
    }

    /// Width of drawn text in world units. Wide glyphs take two cells.
    fn measure(&self, text: &str) -> f64 {
        Span::raw(text).width() as f64 * self.cell_width
    }
}

fn paint_reticle(ctx: &mut Context<'_>, t: &ViewTransform) {
    let grey = Color::DarkGray;
    let axes = [
        ((-RETICLE_ARM, 0.0), (RETICLE_ARM, 0.0)),
        ((0.0, -RETICLE_ARM), (0.0, RETICLE_ARM)),
    ];
    for ((x1, y1), (x2, y2)) in axes {
        let (x1, y1) = t.to_canvas(x1, y1);
        let (x2, y2) = t.to_canvas(x2, y2);
        ctx.draw(&CanvasLine::new(x1, y1, x2, y2, grey));
    }

    for (label, x, y) in [("35", 35.0, 3.0), ("-35", -50.0, 3.0), ("35", -5.0, 40.0), ("-35", -9.0, -35.0)] {
        let (x, y) = t.to_canvas(x, y);
        ctx.print(x, y, Span::styled(label, Style::default().fg(grey)));
    }
}

fn paint_tree(ctx: &mut Context<'_>, loaded: &LoadedTree, t: &ViewTransform) {
    let layout: &TreeLayout = &loaded.layout;
    let cfg = layout.config();

    for edge in layout.edges() {
        let (x1, y1) = t.to_canvas(edge.from.0, edge.from.1);
        let (x2, y2) = t.to_canvas(edge.to.0, edge.to.1);
        ctx.draw(&CanvasLine::new(x1, y1, x2, y2, Color::Gray));
    }

    let root_id = loaded.tree.root_id();
    for placement in layout.placements() {
        if placement.id == root_id {
            let (x, y) = t.to_canvas(placement.x, placement.y);
            ctx.draw(&Circle {
                x,
                y,
                radius: ROOT_RADIUS,
                color: Color::LightYellow,
            });
            continue;
        }

        // canvas rectangles are anchored at their bottom-left corner
        let (left, bottom) = t.to_canvas(placement.x - cfg.box_width / 2.0, placement.y + cfg.box_height);
        let color = if placement.is_leaf() { Color::Cyan } else { Color::White };
        ctx.draw(&Rectangle {
            x: left,
            y: bottom,
            width: cfg.box_width,
            height: cfg.box_height,
            color,
        });
    }

    // text goes last so shapes never cover it
    ctx.layer();
    for placement in layout.placements() {
        if placement.id == root_id {
            let (x, y) = t.to_canvas(placement.x, placement.y);
            ctx.print(x, y, Span::styled(placement.id.clone(), Style::default().fg(Color::LightYellow)));
            continue;
        }
        let text = loaded.tree.text(&placement.id);
        for (i, line) in wrap_words(text, cfg.text_width(), |s| t.measure(s)).into_iter().enumerate() {
            let (x, y) = cfg.text_anchor(placement, i);
            let (x, y) = t.to_canvas(x, y);
            ctx.print(x, y, line);
        }
    }
}

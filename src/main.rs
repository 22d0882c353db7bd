use std::path::PathBuf;
use std::rc::Rc;

use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use minefield::config::DEFAULT_CONFIG_PATH;
use minefield::graphics::GraphicsRenderer;
use minefield::input::{InputAction, InputHandler};
use minefield::{Config, Field, SpriteSheet, Vec2, Viewport};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load(&config_path)?;

    let sheet = Rc::new(SpriteSheet::load_or_placeholder(
        &config.asset_dir,
        config.placeholder_edge,
    )?);

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Minefield")
        .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
        .with_resizable(true)
        .build(&event_loop)?;

    let size = window.inner_size();
    let mut graphics =
        GraphicsRenderer::new(&window, size.width, size.height, config.background)?;

    let mut viewport = Viewport::from_config(&config)?;
    let field = Field::new(
        &viewport,
        Vec2::new(config.origin[0], config.origin[1]),
        (config.cols, config.rows),
        sheet,
    );
    let mut input = InputHandler::new();
    // Moved into the loop closure, which never returns; tear down on exit.
    let mut field = Some(field);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    if let Some(field) = field.take() {
                        field.teardown();
                    }
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    graphics.resize(size.width, size.height);
                    window.request_redraw();
                }
                other => {
                    let Some(field) = field.as_ref() else {
                        return;
                    };
                    match input.handle_window_event(&other) {
                        InputAction::Click { position, button } => {
                            if let Some(index) = field.dispatch_click(&viewport, position, button)
                            {
                                log::debug!("Clicked cell ({}, {})", index.row, index.col);
                            }
                            window.request_redraw();
                        }
                        InputAction::Zoom { delta, anchor } => {
                            viewport.adjust_zoom(delta, anchor);
                            window.request_redraw();
                        }
                        InputAction::Pan(delta) => {
                            viewport.pan_by(delta);
                            window.request_redraw();
                        }
                        InputAction::None => {}
                    }
                }
            },
            Event::RedrawRequested(_) => {
                graphics.render(&viewport);
                if let Err(err) = graphics.present() {
                    log::error!("Render error: {}", err);
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}

use folio::console::{language_switch, prompt_label, Transcript};
use folio::renderer::logical_size;
use folio::terminal::{resolve, Author, Terminal};
use folio::{responder_for, AppConfig, ParticleField, Renderer};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Background window: particle field, redrawn every displayed frame
struct App {
    renderer: Option<Renderer>,
    field: Option<ParticleField>,
    window: Option<Arc<Window>>,
}

impl App {
    fn new() -> Self {
        Self {
            renderer: None,
            field: None,
            window: None,
        }
    }

    fn update(&mut self) {
        if let Some(field) = &mut self.field {
            field.update();
        }
    }

    fn render(&mut self) {
        if let (Some(renderer), Some(field)) = (&mut self.renderer, &self.field) {
            match renderer.render(field) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = renderer.size();
                    renderer.resize(size);
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Folio")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::warn!("No window available, running without background: {}", e);
                return;
            }
        };
        self.window = Some(window.clone());

        // No drawing context means no background, never an error for the user
        match pollster::block_on(Renderer::new(window.clone())) {
            Ok(renderer) => {
                let [width, height] = logical_size(window.inner_size(), window.scale_factor());
                self.field = Some(ParticleField::new(width, height));
                self.renderer = Some(renderer);
            }
            Err(e) => log::warn!("Particle background disabled: {}", e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
                if let (Some(field), Some(window)) = (&mut self.field, &self.window) {
                    let [width, height] = logical_size(physical_size, window.scale_factor());
                    field.resize(width, height);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let (Some(field), Some(window)) = (&mut self.field, &self.window) {
                    let position = position.to_logical::<f32>(window.scale_factor());
                    field.set_pointer(position.x, position.y);
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if let Some(field) = &mut self.field {
                    field.clear_pointer();
                }
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
                if let Some(renderer) = &self.renderer {
                    renderer.window().request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = &self.renderer {
            renderer.window().request_redraw();
        }
    }
}

fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Set up logging
    env_logger::init();

    let config = AppConfig::from_env();
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        // One-shot mode: ask the assistant once
        let prompt = args[1..].join(" ");
        run_oneshot_mode(&config, &prompt);
    } else {
        // Interactive mode: terminal on stdin, particle field in a window
        run_interactive_mode(config);
    }
}

/// One-shot mode: route one question, print the reply
fn run_oneshot_mode(config: &AppConfig, prompt: &str) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };

    let mut terminal = Terminal::new(responder_for(config), config.language);
    let Some(prompt) = terminal.accept(prompt) else {
        // Built-in command or blank input
        if let Some(reply) = terminal.messages().iter().rfind(|m| m.author != Author::User) {
            println!("{}", reply.content);
        }
        return;
    };

    let reply = runtime.block_on(resolve(terminal.responder(), &prompt));
    println!("{}", reply);
}

/// Interactive mode: type in the terminal, the background runs in a window
fn run_interactive_mode(config: AppConfig) {
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            // Headless: the terminal still works without a background
            log::warn!("No event loop available ({}), terminal only", e);
            input_loop(config);
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    // Terminal input runs on its own thread, like a widget beside the canvas
    thread::spawn(move || input_loop(config));

    let mut app = App::new();
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop stopped: {}", e);
    }
}

/// Reads lines from stdin and feeds them to the terminal
fn input_loop(config: AppConfig) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to start async runtime: {}", e);
            return;
        }
    };

    let mut terminal = Terminal::new(responder_for(&config), config.language);
    let mut transcript = Transcript::new();
    let stdout = io::stdout();

    terminal.greet();
    {
        let mut out = stdout.lock();
        let _ = transcript.header(&mut out, &terminal);
        let _ = transcript.sync(&mut out, terminal.messages());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("[{}] > ", prompt_label(terminal.language()));
        let _ = io::stdout().flush();

        let input = match lines.next() {
            Some(Ok(line)) => line,
            _ => break,
        };

        if let Some(lang) = language_switch(&input) {
            terminal.set_language(lang);
            if let Err(e) = transcript.redraw(&mut stdout.lock(), &terminal) {
                log::error!("Failed to write transcript: {}", e);
                break;
            }
            continue;
        }

        if let Some(prompt) = terminal.accept(&input) {
            {
                let mut out = stdout.lock();
                let _ = transcript.sync(&mut out, terminal.messages());
                // Loading indicator while the reply is pending
                let _ = writeln!(out, "> _");
            }
            let reply = runtime.block_on(resolve(terminal.responder(), &prompt));
            terminal.complete(reply);
        }

        if let Err(e) = transcript.sync(&mut stdout.lock(), terminal.messages()) {
            log::error!("Failed to write transcript: {}", e);
            break;
        }
    }
}

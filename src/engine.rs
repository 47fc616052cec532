//! Presentation plumbing: the game loop, the renderer, input capture, and
//! asset loading. Everything simulation-shaped lives in `sim`; this module
//! only paces it and feeds it input.

use crate::browser;
use crate::geometry::{Point, Rect};
use anyhow::{anyhow, Error, Result};
use async_trait::async_trait;
use futures::channel::mpsc::{unbounded, UnboundedReceiver};
use futures::channel::oneshot::channel;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlAudioElement, HtmlImageElement};

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn update(&mut self, input: &FrameInput);
    fn draw(&self, renderer: &Renderer);
}

// length of a frame in milliseconds
const FRAME_SIZE: f32 = 1.0 / 60.0 * 1000.0;

/// Keys currently held down, by `KeyboardEvent::code`.
#[derive(Debug, Default)]
pub struct KeyState {
    pressed: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        KeyState::default()
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }

    fn set_pressed(&mut self, code: String) {
        self.pressed.insert(code);
    }

    fn set_released(&mut self, code: &str) {
        self.pressed.remove(code);
    }
}

/// Everything the browser produced since the last frame: the held-key
/// query plus the mouse clicks that landed on the canvas.
pub struct FrameInput<'a> {
    pub keys: &'a KeyState,
    pub clicks: &'a [Point],
}

enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    Click(Point),
}

/// Hook the browser event handlers up to an unbounded channel the game
/// loop drains once per animation frame. Events are polled, never pushed
/// into the simulation.
fn prepare_input() -> Result<UnboundedReceiver<InputEvent>> {
    let (tx, rx) = unbounded();

    let keydown_tx = tx.clone();
    let onkeydown = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        let _ = keydown_tx.unbounded_send(InputEvent::KeyDown(event.code()));
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

    let keyup_tx = tx.clone();
    let onkeyup = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        let _ = keyup_tx.unbounded_send(InputEvent::KeyUp(event.code()));
    }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

    let click_tx = tx;
    let onclick = browser::closure_wrap(Box::new(move |event: web_sys::MouseEvent| {
        let _ = click_tx.unbounded_send(InputEvent::Click(Point {
            x: event.offset_x() as i16,
            y: event.offset_y() as i16,
        }));
    }) as Box<dyn FnMut(web_sys::MouseEvent)>);

    let window = browser::window()?;
    window.set_onkeydown(Some(onkeydown.as_ref().unchecked_ref()));
    window.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
    browser::canvas()?.set_onclick(Some(onclick.as_ref().unchecked_ref()));

    // handlers live for the whole session
    onkeydown.forget();
    onkeyup.forget();
    onclick.forget();

    Ok(rx)
}

/// Drain the input channel into the key state; returns the clicks that
/// arrived since the last drain.
fn process_input(state: &mut KeyState, events: &mut UnboundedReceiver<InputEvent>) -> Vec<Point> {
    let mut clicks = Vec::new();
    loop {
        match events.try_next() {
            Ok(Some(InputEvent::KeyDown(code))) => state.set_pressed(code),
            Ok(Some(InputEvent::KeyUp(code))) => state.set_released(&code),
            Ok(Some(InputEvent::Click(point))) => clicks.push(point),
            Ok(None) | Err(_) => break,
        }
    }
    clicks
}

pub struct GameLoop {
    last_frame: f64,
    accumulated_delta: f32,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut input_events = prepare_input()?;
        let mut game = game.initialize().await?;
        let mut game_loop = GameLoop {
            last_frame: browser::now()?,
            accumulated_delta: 0.0,
        };
        let renderer = Renderer {
            context: browser::context()?,
        };
        let mut keystate = KeyState::new();
        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            let clicks = process_input(&mut keystate, &mut input_events);
            game_loop.accumulated_delta += (perf - game_loop.last_frame) as f32;
            while game_loop.accumulated_delta > FRAME_SIZE {
                game.update(&FrameInput {
                    keys: &keystate,
                    clicks: &clicks,
                });
                game_loop.accumulated_delta -= FRAME_SIZE;
            }
            game_loop.last_frame = perf;
            game.draw(&renderer);
            let _ = browser::request_animation_frame(f.borrow().as_ref().unwrap());
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.position.x.into(),
            rect.position.y.into(),
            rect.size.width.into(),
            rect.size.height.into(),
        );
    }

    /// Copy `clip` out of the sheet into `destination`, both in pixels.
    pub fn draw_sprite(&self, image: &HtmlImageElement, clip: &Rect, destination: &Rect) {
        self.context
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                clip.position.x.into(),
                clip.position.y.into(),
                clip.size.width.into(),
                clip.size.height.into(),
                destination.position.x.into(),
                destination.position.y.into(),
                destination.size.width.into(),
                destination.size.height.into(),
            )
            .expect("Drawing is throwing exceptions! Unrecoverable error");
    }

    /// Stretch a whole image over `destination`; used for the menu and the
    /// win/lose screens.
    pub fn draw_stretched(&self, image: &HtmlImageElement, destination: &Rect) {
        self.context
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                destination.position.x.into(),
                destination.position.y.into(),
                destination.size.width.into(),
                destination.size.height.into(),
            )
            .expect("Drawing is throwing exceptions! Unrecoverable error");
    }
}

/// Asynchronously load an image from a given source path
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::new_image()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!("Error loading image: {:#?}", err)));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callbacks alive until the image loads or errors
    success_callback.forget();
    error_callback.forget();

    rx.await??;

    Ok(image)
}

/// A looping background track. Playback is fire-and-forget; the only state
/// the game ever asks for is "is something playing".
pub struct Audio {
    element: HtmlAudioElement,
}

pub fn load_audio(source: &str) -> Result<Audio> {
    let element = browser::new_audio()?;
    element.set_src(source);
    element.set_loop(true);
    Ok(Audio { element })
}

impl Audio {
    pub fn play(&self) {
        // browsers may refuse autoplay until the user interacts; retried
        // every frame by the caller, so a refusal here is only noise
        if let Err(err) = self.element.play() {
            log!("Audio playback refused : {:#?}", err);
        }
    }

    pub fn is_playing(&self) -> bool {
        !self.element.paused()
    }
}

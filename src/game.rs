//! The game shell: asset loading, the menu, audio, and rendering of the
//! draw commands the simulation emits. All real decisions happen in `sim`.

use crate::engine::{self, Audio, FrameInput, Game, KeyState, Renderer};
use crate::geometry::{Point, Rect};
use crate::sim::{
    DrawCommand, GameState, InputSnapshot, LevelLayout, Session, SheetId, VIEWPORT_HEIGHT,
    VIEWPORT_WIDTH,
};
use crate::browser;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::join;
use web_sys::HtmlImageElement;

mod assets {
    pub const PLAYER: &str = "assets/player.png";
    pub const DOG: &str = "assets/dog.png";
    pub const MUMMY: &str = "assets/mummy.png";
    pub const BACKGROUND: &str = "assets/background1.png";
    pub const MENU: &str = "assets/menu.png";
    pub const INSTRUCTIONS: &str = "assets/instructions.png";
    pub const HIGH_SCORES: &str = "assets/highscore.png";
    pub const WIN: &str = "assets/win.png";
    pub const OVER: &str = "assets/over.png";
    pub const MUSIC: &str = "assets/music.mp3";
    pub const LEVEL: &str = "level.json";
}

// Menu button hit regions, in screen space. One column of buttons, so the
// x range is shared.
const BUTTON_X: (i16, i16) = (40, 274);
const START_Y: (i16, i16) = (165, 224);
const INSTRUCTIONS_Y: (i16, i16) = (272, 333);
const HIGH_SCORES_Y: (i16, i16) = (384, 449);
const EXIT_Y: (i16, i16) = (486, 556);

fn inside(click: Point, y_range: (i16, i16)) -> bool {
    click.x >= BUTTON_X.0 && click.x <= BUTTON_X.1 && click.y >= y_range.0 && click.y <= y_range.1
}

const VIEWPORT: Rect = Rect::from_parts(0, 0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT);

pub enum DesertRush {
    /// Nothing loaded yet; `initialize` turns this into `Loaded`.
    Loading,
    Loaded(Box<Scene>),
}

impl DesertRush {
    pub fn new() -> Self {
        DesertRush::Loading
    }
}

impl Default for DesertRush {
    fn default() -> Self {
        DesertRush::new()
    }
}

/// Which screen the menu collaborator is showing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MenuScreen {
    Main,
    Instructions,
    HighScores,
}

/// Every image is optional: a failed load is logged and the entity simply
/// never renders, the session keeps running regardless.
struct Assets {
    player: Option<HtmlImageElement>,
    dog: Option<HtmlImageElement>,
    mummy: Option<HtmlImageElement>,
    background: Option<HtmlImageElement>,
    menu: Option<HtmlImageElement>,
    instructions: Option<HtmlImageElement>,
    high_scores: Option<HtmlImageElement>,
    win: Option<HtmlImageElement>,
    over: Option<HtmlImageElement>,
}

impl Assets {
    fn sheet(&self, id: SheetId) -> Option<&HtmlImageElement> {
        match id {
            SheetId::Player => self.player.as_ref(),
            SheetId::Dog => self.dog.as_ref(),
            SheetId::Mummy => self.mummy.as_ref(),
        }
    }
}

async fn load_optional(path: &str) -> Option<HtmlImageElement> {
    match engine::load_image(path).await {
        Ok(image) => Some(image),
        Err(err) => {
            log!("Failed to load {} : {:#?}", path, err);
            None
        }
    }
}

async fn load_layout() -> LevelLayout {
    match browser::fetch_json::<LevelLayout>(assets::LEVEL).await {
        Ok(layout) => layout,
        Err(err) => {
            log!("Falling back to the built-in level : {:#?}", err);
            LevelLayout::default()
        }
    }
}

pub struct Scene {
    session: Session,
    assets: Assets,
    music: Option<Audio>,
    menu_screen: MenuScreen,
    /// Draw commands from the last simulated frame, in level space.
    commands: Vec<DrawCommand>,
    escape_held: bool,
}

impl Scene {
    fn update(&mut self, input: &FrameInput) {
        self.handle_pause_toggle(input.keys);
        match self.session.state {
            GameState::Menu => self.update_menu(input.clicks),
            GameState::Playing => {
                if let Some(music) = &self.music {
                    if !music.is_playing() {
                        music.play();
                    }
                }
                let snapshot = snapshot_from(input.keys);
                self.commands = self.session.step(&snapshot);
            }
            // paused frames and terminal states simulate nothing
            GameState::Paused | GameState::Win | GameState::Lose | GameState::Exit => {}
        }
    }

    fn handle_pause_toggle(&mut self, keys: &KeyState) {
        let escape = keys.is_pressed("Escape");
        if escape && !self.escape_held {
            self.session.state = match self.session.state {
                GameState::Playing => GameState::Paused,
                GameState::Paused => GameState::Playing,
                other => other,
            };
        }
        self.escape_held = escape;
    }

    fn update_menu(&mut self, clicks: &[Point]) {
        for &click in clicks {
            if inside(click, START_Y) {
                self.session.state = GameState::Playing;
            } else if inside(click, INSTRUCTIONS_Y) {
                self.menu_screen = MenuScreen::Instructions;
            } else if inside(click, HIGH_SCORES_Y) {
                self.menu_screen = MenuScreen::HighScores;
            } else if inside(click, EXIT_Y) {
                self.session.state = GameState::Exit;
            } else {
                self.menu_screen = MenuScreen::Main;
            }
        }
    }

    fn draw(&self, renderer: &Renderer) {
        renderer.clear(&VIEWPORT);
        match self.session.state {
            GameState::Menu | GameState::Paused => {
                let screen = match self.menu_screen {
                    MenuScreen::Main => self.assets.menu.as_ref(),
                    MenuScreen::Instructions => self.assets.instructions.as_ref(),
                    MenuScreen::HighScores => self.assets.high_scores.as_ref(),
                };
                if let Some(image) = screen {
                    renderer.draw_stretched(image, &VIEWPORT);
                }
            }
            GameState::Playing => self.draw_level(renderer),
            GameState::Win => {
                if let Some(image) = self.assets.win.as_ref() {
                    renderer.draw_stretched(image, &VIEWPORT);
                }
            }
            GameState::Lose => {
                if let Some(image) = self.assets.over.as_ref() {
                    renderer.draw_stretched(image, &VIEWPORT);
                }
            }
            GameState::Exit => {}
        }
    }

    fn draw_level(&self, renderer: &Renderer) {
        let camera = self.session.camera;
        if let Some(background) = self.assets.background.as_ref() {
            // the camera window of the background fills the screen
            renderer.draw_sprite(background, &camera, &VIEWPORT);
        }
        for command in &self.commands {
            if let Some(image) = self.assets.sheet(command.sheet) {
                let destination = Rect::new(
                    Point {
                        x: command.position.x - camera.position.x,
                        y: command.position.y - camera.position.y,
                    },
                    command.clip.size,
                );
                renderer.draw_sprite(image, &command.clip, &destination);
            }
        }
    }
}

#[async_trait(?Send)]
impl Game for DesertRush {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            DesertRush::Loading => {
                // independent resources load in parallel; the slowest wins
                let (player, dog, mummy, background, menu, instructions, high_scores, win, over, layout) = join!(
                    load_optional(assets::PLAYER),
                    load_optional(assets::DOG),
                    load_optional(assets::MUMMY),
                    load_optional(assets::BACKGROUND),
                    load_optional(assets::MENU),
                    load_optional(assets::INSTRUCTIONS),
                    load_optional(assets::HIGH_SCORES),
                    load_optional(assets::WIN),
                    load_optional(assets::OVER),
                    load_layout(),
                );
                let music = match engine::load_audio(assets::MUSIC) {
                    Ok(audio) => Some(audio),
                    Err(err) => {
                        log!("Failed to load {} : {:#?}", assets::MUSIC, err);
                        None
                    }
                };
                let scene = Scene {
                    session: Session::with_layout(&layout),
                    assets: Assets {
                        player,
                        dog,
                        mummy,
                        background,
                        menu,
                        instructions,
                        high_scores,
                        win,
                        over,
                    },
                    music,
                    menu_screen: MenuScreen::Main,
                    commands: Vec::new(),
                    escape_held: false,
                };
                Ok(Box::new(DesertRush::Loaded(Box::new(scene))))
            }
            DesertRush::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, input: &FrameInput) {
        if let DesertRush::Loaded(scene) = self {
            scene.update(input);
        }
    }

    fn draw(&self, renderer: &Renderer) {
        if let DesertRush::Loaded(scene) = self {
            scene.draw(renderer);
        }
    }
}

fn snapshot_from(keys: &KeyState) -> InputSnapshot {
    InputSnapshot {
        jump: keys.is_pressed("ArrowUp"),
        left: keys.is_pressed("ArrowLeft"),
        right: keys.is_pressed("ArrowRight"),
        attack: keys.is_pressed("Space"),
        power: keys.is_pressed("ControlLeft"),
    }
}

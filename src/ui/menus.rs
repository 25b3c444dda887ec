//! Menu screens - main menu, pause, level complete and game over.

use bevy::prelude::*;

use crate::core::{GameState, MetaState, SaveRequest};
use crate::world::{CurrentLevel, LevelRegistry};

/// Root of a menu screen; everything under it goes when the screen closes.
#[derive(Component)]
pub struct MenuScreen;

/// Marker for the menu camera (used when no game camera exists).
#[derive(Component)]
struct MenuCamera;

/// Marker for menu buttons.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    NewGame,
    ClearSave,
    Quit,
    Resume,
    Continue,
    Retry,
    MainMenu,
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVER: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

/// Set up menu systems.
pub fn setup_menu_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
        .add_systems(OnEnter(GameState::Paused), setup_pause_menu)
        .add_systems(OnEnter(GameState::LevelComplete), setup_level_complete)
        .add_systems(OnEnter(GameState::GameOver), setup_game_over)
        .add_systems(OnExit(GameState::MainMenu), cleanup_menu)
        .add_systems(OnExit(GameState::Paused), cleanup_menu)
        .add_systems(OnExit(GameState::LevelComplete), cleanup_menu)
        .add_systems(OnExit(GameState::GameOver), cleanup_menu)
        .add_systems(Update, menu_button_input.run_if(not(in_state(GameState::InGame))));
}

/// Spawn a full-screen menu with a title, info lines and buttons.
fn spawn_screen(
    commands: &mut Commands,
    background: Color,
    title: (&str, f32, Color),
    lines: &[String],
    buttons: &[(&str, MenuButton)],
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(background),
            MenuScreen,
        ))
        .with_children(|parent| {
            let (text, size, color) = title;
            parent.spawn((
                Text::new(text),
                TextFont {
                    font_size: size,
                    ..default()
                },
                TextColor(color),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            for line in lines {
                parent.spawn((
                    Text::new(line.clone()),
                    TextFont {
                        font_size: 24.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.7, 0.7, 0.75)),
                    Node {
                        margin: UiRect::bottom(Val::Px(10.0)),
                        ..default()
                    },
                ));
            }

            for (label, button) in buttons {
                spawn_menu_button(parent, label, *button);
            }
        });
}

/// Helper to spawn a menu button.
fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

fn setup_main_menu(mut commands: Commands, meta: Res<MetaState>) {
    commands.spawn((Camera2d, MenuCamera));
    spawn_screen(
        &mut commands,
        Color::srgb(0.05, 0.07, 0.05),
        ("SLIME SIEGE", 80.0, Color::srgb(0.5, 0.85, 0.4)),
        &[
            format!("Welcome back, {}", meta.player_name),
            format!("High score: {}", meta.high_score),
        ],
        &[
            ("New Game", MenuButton::NewGame),
            ("Clear Save", MenuButton::ClearSave),
            ("Quit", MenuButton::Quit),
        ],
    );
}

/// The level and its camera stay up behind the overlay.
fn setup_pause_menu(mut commands: Commands) {
    spawn_screen(
        &mut commands,
        Color::srgba(0.0, 0.0, 0.0, 0.7),
        ("PAUSED", 48.0, Color::srgb(0.8, 0.8, 0.85)),
        &[],
        &[
            ("Resume", MenuButton::Resume),
            ("Main Menu", MenuButton::MainMenu),
        ],
    );
}

fn setup_level_complete(mut commands: Commands, meta: Res<MetaState>) {
    commands.spawn((Camera2d, MenuCamera));
    spawn_screen(
        &mut commands,
        Color::srgba(0.0, 0.08, 0.02, 0.9),
        ("LEVEL COMPLETE", 64.0, Color::srgb(0.6, 0.9, 0.5)),
        &[
            format!("Score: {}", meta.score),
            format!("High score: {}", meta.high_score),
        ],
        &[
            ("Continue", MenuButton::Continue),
            ("Main Menu", MenuButton::MainMenu),
        ],
    );
}

fn setup_game_over(mut commands: Commands, meta: Res<MetaState>) {
    commands.spawn((Camera2d, MenuCamera));
    spawn_screen(
        &mut commands,
        Color::srgba(0.1, 0.0, 0.0, 0.9),
        ("GAME OVER", 72.0, Color::srgb(0.8, 0.2, 0.2)),
        &[
            format!("Score: {}", meta.score),
            format!("High score: {}", meta.high_score),
        ],
        &[
            ("Retry", MenuButton::Retry),
            ("Main Menu", MenuButton::MainMenu),
        ],
    );
}

/// What pressing a button asks of the rest of the game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuEffect {
    pub next_state: Option<GameState>,
    pub save_request: Option<SaveRequest>,
    pub quit: bool,
}

/// Apply a button press to progress and level selection.
pub fn press_button(
    button: MenuButton,
    meta: &mut MetaState,
    current_level: &mut CurrentLevel,
    levels: &LevelRegistry,
) -> MenuEffect {
    match button {
        MenuButton::NewGame => {
            meta.start_run();
            if let Some(first) = levels.first_key() {
                current_level.name = first;
            }
            MenuEffect {
                next_state: Some(GameState::InGame),
                ..default()
            }
        }
        MenuButton::Retry => {
            meta.start_run();
            MenuEffect {
                next_state: Some(GameState::InGame),
                ..default()
            }
        }
        MenuButton::Continue => {
            // Past the last level the run wraps to the first one
            if let Some(next) = levels
                .next_key(&current_level.name)
                .or_else(|| levels.first_key())
            {
                current_level.name = next;
            }
            MenuEffect {
                next_state: Some(GameState::InGame),
                ..default()
            }
        }
        MenuButton::Resume => MenuEffect {
            next_state: Some(GameState::InGame),
            ..default()
        },
        MenuButton::MainMenu => MenuEffect {
            next_state: Some(GameState::MainMenu),
            ..default()
        },
        MenuButton::ClearSave => MenuEffect {
            save_request: Some(SaveRequest::Clear),
            ..default()
        },
        MenuButton::Quit => MenuEffect {
            quit: true,
            ..default()
        },
    }
}

/// Handle menu button interactions on every screen.
fn menu_button_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut meta: ResMut<MetaState>,
    mut current_level: ResMut<CurrentLevel>,
    levels: Res<LevelRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
    mut save_requests: EventWriter<SaveRequest>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                let effect = press_button(*button, &mut meta, &mut current_level, &levels);
                if let Some(state) = effect.next_state {
                    next_state.set(state);
                }
                if let Some(request) = effect.save_request {
                    save_requests.send(request);
                }
                if effect.quit {
                    exit.send(AppExit::Success);
                }
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVER.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}

/// Clean up menu entities and the menu camera.
fn cleanup_menu(
    mut commands: Commands,
    ui_query: Query<Entity, With<MenuScreen>>,
    camera_query: Query<Entity, With<MenuCamera>>,
) {
    for entity in ui_query.iter().chain(camera_query.iter()) {
        commands.entity(entity).despawn_recursive();
    }
}

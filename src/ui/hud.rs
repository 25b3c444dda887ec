//! In-game HUD - health bar, score, lives and high score.
//!
//! Driven only by [`UiNotification`]s; it never polls actors.

use bevy::prelude::*;

use crate::core::{GameState, MetaState, UiNotification};
use crate::player::Player;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// HUD text fields, each showing one counter.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudCounter {
    Score,
    Lives,
    HighScore,
}

impl HudCounter {
    pub fn label(&self, value: u32) -> String {
        match self {
            HudCounter::Score => format!("Score: {}", value),
            HudCounter::Lives => format!("Lives: {}", value),
            HudCounter::HighScore => format!("Best: {}", value),
        }
    }

    /// The counter a notification updates, with its new value.
    pub fn from_notification(notification: &UiNotification) -> Option<(Self, u32)> {
        match *notification {
            UiNotification::ScoreChanged(value) => Some((HudCounter::Score, value)),
            UiNotification::LivesChanged(value) => Some((HudCounter::Lives, value)),
            UiNotification::HighScoreChanged(value) => Some((HudCounter::HighScore, value)),
            _ => None,
        }
    }
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(
            Update,
            apply_notifications.run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI, unless it survived a pause.
fn spawn_hud(mut commands: Commands, meta: Res<MetaState>, existing: Query<(), With<HudRoot>>) {
    if !existing.is_empty() {
        return;
    }

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_health_bar(parent);

            for (counter, value) in [
                (HudCounter::Score, meta.score),
                (HudCounter::Lives, meta.lives),
                (HudCounter::HighScore, meta.high_score),
            ] {
                parent.spawn((
                    Text::new(counter.label(value)),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.85)),
                    counter,
                ));
            }
        });
}

fn spawn_health_bar(parent: &mut ChildBuilder) {
    parent
        .spawn(Node {
            width: Val::Px(200.0),
            height: Val::Px(14.0),
            margin: UiRect::bottom(Val::Px(8.0)),
            ..default()
        })
        .insert(BackgroundColor(Color::srgb(0.1, 0.1, 0.1)))
        .with_children(|bar| {
            bar.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
                HealthBar,
            ));
        });
}

/// Apply each notification to the widget it concerns.
fn apply_notifications(
    mut notifications: EventReader<UiNotification>,
    player_query: Query<(), With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
    mut text_query: Query<(&mut Text, &HudCounter)>,
) {
    for notification in notifications.read() {
        if let UiNotification::HealthChanged {
            entity,
            current,
            max,
        } = *notification
        {
            if player_query.get(entity).is_err() {
                continue;
            }
            let fraction = if max > 0.0 { (current / max).clamp(0.0, 1.0) } else { 0.0 };
            for mut bar in bar_query.iter_mut() {
                bar.width = Val::Percent(fraction * 100.0);
            }
            continue;
        }

        let Some((changed, value)) = HudCounter::from_notification(notification) else {
            continue;
        };
        for (mut text, counter) in text_query.iter_mut() {
            if *counter == changed {
                text.0 = counter.label(value);
            }
        }
    }
}

/// Clean up HUD entities.
pub fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

//! Rendering plugin - sprite facing and hit feedback.

use bevy::prelude::*;

use super::visual_config::{load_visual_config, VisualConfig};
use crate::combat::Corpse;
use crate::core::{AnimationTrigger, GameState};
use crate::physics::Facing;

/// Rendering plugin - turns facing and animation triggers into sprite changes.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VisualConfig>()
            .add_systems(Startup, load_visual_config)
            .add_systems(
                Update,
                (flip_sprites, start_flash, fade_flash, fade_corpses)
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// A temporary tint; `base` is restored when the timer runs out.
#[derive(Component, Debug, Clone)]
pub struct Flash {
    pub timer: Timer,
    pub base: Color,
}

/// Mirror sprites to match their facing.
pub fn flip_sprites(mut query: Query<(&Facing, &mut Sprite), Changed<Facing>>) {
    for (facing, mut sprite) in query.iter_mut() {
        sprite.flip_x = *facing == Facing::Left;
    }
}

/// Tint sprites named by animation triggers.
fn start_flash(
    mut commands: Commands,
    config: Res<VisualConfig>,
    mut triggers: EventReader<AnimationTrigger>,
    mut sprites: Query<(&mut Sprite, Option<&Flash>)>,
) {
    for trigger in triggers.read() {
        let Some(color) = config.flash_color(trigger.name) else {
            continue;
        };
        let Ok((mut sprite, flash)) = sprites.get_mut(trigger.entity) else {
            continue;
        };
        // A flash on top of a flash keeps the original color
        let base = flash.map_or(sprite.color, |flash| flash.base);
        sprite.color = color;
        commands.entity(trigger.entity).insert(Flash {
            timer: Timer::from_seconds(config.flash_secs, TimerMode::Once),
            base,
        });
    }
}

fn fade_flash(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Flash, &mut Sprite)>,
) {
    for (entity, mut flash, mut sprite) in query.iter_mut() {
        flash.timer.tick(time.delta());
        if flash.timer.finished() {
            sprite.color = flash.base;
            commands.entity(entity).remove::<Flash>();
        }
    }
}

/// Fade slain actors out over their corpse delay.
fn fade_corpses(mut query: Query<(&Corpse, &mut Sprite), Without<Flash>>) {
    for (corpse, mut sprite) in query.iter_mut() {
        sprite.color.set_alpha(1.0 - corpse.0.fraction());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_follows_facing() {
        let mut app = App::new();
        app.add_systems(Update, flip_sprites);
        let entity = app
            .world_mut()
            .spawn((Facing::Left, Sprite::default()))
            .id();

        app.update();
        assert!(app.world().get::<Sprite>(entity).unwrap().flip_x);

        app.world_mut().entity_mut(entity).insert(Facing::Right);
        app.update();
        assert!(!app.world().get::<Sprite>(entity).unwrap().flip_x);
    }
}

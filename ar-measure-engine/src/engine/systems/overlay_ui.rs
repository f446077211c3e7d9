use bevy::prelude::*;

use crate::session::{ArSessionController, SessionNotice};

/// Root of the on-screen overlay, shown once the box is placed.
#[derive(Component)]
pub struct OverlayRoot;

#[derive(Component)]
pub struct DimensionsLabelText;

const CONTROLS_HINT: &str =
    "Enter: start/end session  Click/Space: place  Q/A W/S E/D: width/height/depth";

/// Native stand-in for the DOM overlay: size label plus a controls hint.
pub fn spawn_overlay_ui(mut commands: Commands, controller: Res<ArSessionController>) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(CONTROLS_HINT),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
            ));

            parent
                .spawn((
                    Node {
                        display: Display::None,
                        position_type: PositionType::Absolute,
                        bottom: Val::Px(24.0),
                        left: Val::Px(0.0),
                        right: Val::Px(0.0),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    OverlayRoot,
                ))
                .with_children(|overlay| {
                    overlay.spawn((
                        Text::new(format!("Size: {}", controller.dimensions().label())),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        DimensionsLabelText,
                    ));
                });
        });
}

/// Show or hide the overlay and refresh the size label from session notices.
pub fn update_overlay_ui(
    mut notices: EventReader<SessionNotice>,
    mut overlays: Query<&mut Node, With<OverlayRoot>>,
    mut labels: Query<&mut Text, With<DimensionsLabelText>>,
) {
    for notice in notices.read() {
        match notice {
            SessionNotice::OverlayVisibility { visible } => {
                let Ok(mut node) = overlays.single_mut() else {
                    continue;
                };
                node.display = if *visible {
                    Display::Flex
                } else {
                    Display::None
                };
            }
            SessionNotice::DimensionsLabel { label } => {
                let Ok(mut text) = labels.single_mut() else {
                    continue;
                };
                text.0 = format!("Size: {label}");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ArSessionController>()
            .add_event::<SessionNotice>()
            .add_systems(Startup, spawn_overlay_ui)
            .add_systems(Update, update_overlay_ui);
        app.update();
        app
    }

    fn overlay_display(app: &mut App) -> Display {
        let mut query = app.world_mut().query_filtered::<&Node, With<OverlayRoot>>();
        query.single(app.world()).unwrap().display
    }

    fn label(app: &mut App) -> String {
        let mut query = app
            .world_mut()
            .query_filtered::<&Text, With<DimensionsLabelText>>();
        query.single(app.world()).unwrap().0.clone()
    }

    #[test]
    fn overlay_starts_hidden_with_current_size() {
        let mut app = test_app();
        assert_eq!(overlay_display(&mut app), Display::None);
        assert_eq!(label(&mut app), "Size: 30 x 30 x 30 cm");
    }

    #[test]
    fn overlay_follows_visibility_notices() {
        let mut app = test_app();
        app.world_mut()
            .send_event(SessionNotice::OverlayVisibility { visible: true });
        app.update();
        assert_eq!(overlay_display(&mut app), Display::Flex);

        app.world_mut()
            .send_event(SessionNotice::OverlayVisibility { visible: false });
        app.update();
        assert_eq!(overlay_display(&mut app), Display::None);
    }

    #[test]
    fn label_refreshes_while_hidden() {
        let mut app = test_app();
        app.world_mut().send_event(SessionNotice::DimensionsLabel {
            label: "25 x 30 x 15 cm".to_string(),
        });
        app.update();
        assert_eq!(label(&mut app), "Size: 25 x 30 x 15 cm");
        assert_eq!(overlay_display(&mut app), Display::None);
    }
}

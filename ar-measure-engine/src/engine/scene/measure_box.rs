use bevy::pbr::wireframe::{Wireframe, WireframeColor};
use bevy::prelude::*;
use bevy::render::alpha::AlphaMode;

use constants::render_settings::{BOX_COLOUR, BOX_EDGE_COLOUR};

use crate::session::dimensions::BoxDimensions;

#[derive(Component)]
pub struct MeasureBox;

/// Spawn the single measuring box, hidden and scaled to `dimensions`.
///
/// The cube mesh sits on a child offset by half its height so the parent
/// origin is the centre of the base. Scaling the parent then grows the box
/// upwards from the surface it was placed on.
pub fn spawn_measure_box(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    dimensions: BoxDimensions,
) -> Entity {
    let [r, g, b, a] = BOX_COLOUR;
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(r, g, b, a),
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.6,
        ..default()
    });

    let [er, eg, eb, ea] = BOX_EDGE_COLOUR;

    commands
        .spawn((
            MeasureBox,
            Transform::from_scale(dimensions.scale()),
            Visibility::Hidden,
            Name::new("MeasureBox"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::from_size(Vec3::ONE))),
                MeshMaterial3d(material),
                Transform::from_xyz(0.0, 0.5, 0.0),
                Wireframe,
                WireframeColor {
                    color: Color::srgba(er, eg, eb, ea),
                },
                Name::new("MeasureBoxMesh"),
            ));
        })
        .id()
}

use bevy::prelude::*;
use constants::render_settings::{RETICLE_COLOUR, RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS};

#[derive(Component)]
pub struct Reticle;

/// Spawn the reticle hidden. Its transform is overwritten with each detected surface pose.
pub fn spawn_reticle(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let [r, g, b, a] = RETICLE_COLOUR;
    let material = materials.add(StandardMaterial {
        base_color: Color::srgba(r, g, b, a),
        unlit: true,
        cull_mode: None,
        ..default()
    });

    // Annulus is built in the XY plane, lay it flat on the surface.
    let ring = Mesh::from(Annulus::new(RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS));

    commands
        .spawn((
            Reticle,
            Transform::IDENTITY,
            Visibility::Hidden,
            Name::new("Reticle"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(ring)),
                MeshMaterial3d(material),
                Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
                Name::new("ReticleRing"),
            ));
        })
        .id()
}

use bevy::prelude::*;
use robot_fight::combat::ShapeKind;
use robot_fight::{Arena, Tournament};

/// Marker for shapes rebuilt from the match snapshot whenever it changes
#[derive(Component)]
pub struct Drawn;

/// Marker for the static floor
#[derive(Component)]
pub struct Floor;

/// Unit square shared by every drawn rectangle; size comes from the transform scale
#[derive(Resource)]
pub struct UnitSquare(Handle<Mesh>);

/// Converts arena coordinates (origin top-left, y down) to world coordinates
/// (origin at the arena centre, y up).
fn to_world(point: Vec2, arena: &Arena) -> Vec2 {
    Vec2::new(point.x - arena.width / 2.0, arena.height / 2.0 - point.y)
}

fn layer(kind: ShapeKind) -> f32 {
    match kind {
        ShapeKind::Attacker | ShapeKind::Defender => 1.0,
        ShapeKind::Projectile => 2.0,
        ShapeKind::Melee => 3.0,
    }
}

fn rect_transform(rect: Rect, arena: &Arena, z: f32) -> Transform {
    Transform::from_translation(to_world(rect.center(), arena).extend(z))
        .with_scale(rect.size().extend(1.0))
}

pub fn spawn_floor(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    tournament: Res<Tournament>,
) {
    let square = meshes.add(Rectangle::new(1.0, 1.0));
    let arena = tournament.arena();
    let floor = Rect::new(0.0, arena.floor_y(), arena.width, arena.height);

    commands.spawn((
        Floor,
        Mesh2d(square.clone()),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgb(0.55, 0.55, 0.55)))),
        rect_transform(floor, arena, 0.0),
    ));
    commands.insert_resource(UnitSquare(square));
}

/// System to redraw robots and attacks whenever the tournament advanced
pub fn draw_match(
    mut commands: Commands,
    mut materials: ResMut<Assets<ColorMaterial>>,
    square: Option<Res<UnitSquare>>,
    tournament: Res<Tournament>,
    drawn: Query<Entity, With<Drawn>>,
) {
    let Some(square) = square else {
        return;
    };
    if !tournament.is_changed() && !drawn.is_empty() {
        return;
    }

    for entity in drawn.iter() {
        commands.entity(entity).despawn();
    }

    let arena = tournament.arena();
    for shape in tournament.current().snapshot().shapes {
        commands.spawn((
            Drawn,
            Mesh2d(square.0.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(shape.color))),
            rect_transform(shape.rect, arena, layer(shape.kind)),
        ));
    }
}

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use robot_fight::Tournament;

#[derive(Component)]
pub struct MainCamera;

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        MainCamera,
        Transform::from_xyz(0.0, 0.0, 0.0),
        OrthographicProjection {
            scale: 1.0,
            ..OrthographicProjection::default_2d()
        },
    ));
}

/// Keeps the whole arena visible whatever the window size
pub fn fit_camera(
    windows: Query<&Window, With<PrimaryWindow>>,
    tournament: Res<Tournament>,
    mut query: Query<&mut OrthographicProjection, With<MainCamera>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    if window.width() <= 0.0 || window.height() <= 0.0 {
        return;
    }

    let arena = tournament.arena();
    let scale = (arena.width / window.width()).max(arena.height / window.height());
    if let Ok(mut projection) = query.get_single_mut() {
        if projection.scale != scale {
            projection.scale = scale;
        }
    }
}

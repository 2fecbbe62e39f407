use bevy::prelude::*;

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d at scale 1 shows exactly the 1000×800 simulation area
    commands.spawn(Camera2d);
    info!("Camera spawned");
}

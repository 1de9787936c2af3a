//! End-to-end frame loop tests exercising scenes, physics and rendering
//! together through the public API.

use ember2d::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

fn engine_with_scene(name: &str) -> Engine {
    ember2d::foundation::logging::try_init();
    let mut engine = Engine::new(EngineConfig::default());
    engine.scene_manager_mut().create_scene(name);
    engine.scene_manager_mut().load_scene(name).unwrap();
    engine
}

#[test]
fn a_dropped_body_falls_through_fixed_steps() {
    let mut engine = engine_with_scene("fall");
    let entity = engine
        .scene_manager_mut()
        .with_scene("fall", |ctx| {
            let entity = ctx.spawn(Transform2D::from_position(Vec2::new(0.0, 10.0)));
            ctx.add_rigid_body(entity, BodyType::Dynamic).unwrap();
            entity
        })
        .unwrap();

    let mut backend = RecordingBackend::default();
    // one second of simulation at the default 50 Hz step
    for _ in 0..50 {
        engine.advance(1.0 / 50.0, &mut backend);
    }

    let scene = engine.scene_manager().scene("fall").unwrap();
    let transform = scene
        .registry()
        .get_component::<Transform2D>(entity)
        .unwrap();
    assert!(
        transform.position.y < 6.0,
        "body should have fallen well below its spawn, at y = {}",
        transform.position.y
    );
}

#[test]
fn contact_callbacks_fire_on_both_overlapping_shapes() {
    let mut engine = engine_with_scene("contact");
    let begins = Rc::new(RefCell::new(Vec::new()));

    engine
        .scene_manager_mut()
        .with_scene("contact", |ctx| {
            ctx.physics.set_gravity(Vec2::new(0.0, 0.0));

            let left = ctx.spawn(Transform2D::from_position(Vec2::new(0.0, 0.0)));
            ctx.add_rigid_body(left, BodyType::Dynamic).unwrap();
            let left_collider = ctx.add_box_collider(left).unwrap();

            let right = ctx.spawn(Transform2D::from_position(Vec2::new(0.25, 0.0)));
            ctx.add_rigid_body(right, BodyType::Dynamic).unwrap();
            let right_collider = ctx.add_box_collider(right).unwrap();

            left_collider.set_contact_events_enabled(ctx.physics, true);
            right_collider.set_contact_events_enabled(ctx.physics, true);

            let sink = Rc::clone(&begins);
            left_collider.on_contact_begin(ctx.physics, move |_| {
                sink.borrow_mut().push("left");
            });
            let sink = Rc::clone(&begins);
            right_collider.on_contact_begin(ctx.physics, move |_| {
                sink.borrow_mut().push("right");
            });
        })
        .unwrap();

    let mut backend = RecordingBackend::default();
    engine.advance(1.0 / 50.0, &mut backend);

    let fired = begins.borrow();
    assert_eq!(fired.len(), 2, "both participants should hear the begin");
    assert!(fired.contains(&"left") && fired.contains(&"right"));
}

#[test]
fn gameplay_system_steers_an_entity_every_fixed_step() {
    struct Thruster {
        target: Option<Entity>,
    }

    impl System for Thruster {
        fn start(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), EngineError> {
            let entity = ctx.spawn(Transform2D::default());
            let body = ctx.add_rigid_body(entity, BodyType::Dynamic)?;
            body.set_gravity_scale(ctx.physics, 0.0);
            self.target = Some(entity);
            Ok(())
        }

        fn fixed_update(&mut self, ctx: &mut SceneContext<'_>) -> Result<(), EngineError> {
            let Some(entity) = self.target else {
                return Ok(());
            };
            if let Some(body) = ctx.registry.get_component::<RigidBody>(entity).copied() {
                body.set_velocity(ctx.physics, Vec2::new(2.0, 0.0));
            }
            Ok(())
        }
    }

    let mut engine = engine_with_scene("steer");
    engine
        .scene_manager_mut()
        .add_system("steer", || Thruster { target: None })
        .unwrap();

    let mut backend = RecordingBackend::default();
    for _ in 0..50 {
        engine.advance(1.0 / 50.0, &mut backend);
    }

    let scene = engine.scene_manager().scene("steer").unwrap();
    let moved = scene
        .registry()
        .view2::<Transform2D, RigidBody>()
        .map(|(_, transform, _)| transform.position.x)
        .next()
        .expect("the thruster spawned an entity");
    assert!(moved > 1.0, "entity should have drifted right, x = {moved}");
}

#[test]
fn a_full_frame_renders_sprites_and_gizmos() {
    let mut engine = engine_with_scene("draw");
    let texture = engine.textures_mut().register("ship", 64, 64);

    engine
        .scene_manager_mut()
        .with_scene("draw", |ctx| {
            let camera = ctx.spawn(Transform2D::default());
            ctx.add_camera(camera, Camera::new(800, 600)).unwrap();

            for x in 0..3 {
                ctx.spawn_sprite(
                    Transform2D::from_position(Vec2::new(x as f32, 0.0)),
                    SpriteRenderer::new(texture),
                );
            }
            // far outside the 10-unit-tall view
            ctx.spawn_sprite(
                Transform2D::from_position(Vec2::new(500.0, 0.0)),
                SpriteRenderer::new(texture),
            );

            ctx.gizmos.draw_box(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), 0.0);
            ctx.gizmos.draw_line(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        })
        .unwrap();

    let mut backend = RecordingBackend::default();
    engine.advance(1.0 / 60.0, &mut backend);

    assert!(backend.camera.is_some());
    assert_eq!(backend.draws.len(), 1, "one texture, one layer, one batch");
    assert_eq!(backend.draws[0].instance_count, 3);
    assert_eq!(backend.gizmo_primitives, 2);
    assert_eq!(engine.sprites().stats().visible_sprites, 3);
    assert_eq!(engine.sprites().stats().culled_sprites, 1);
    assert_eq!(engine.sprites().stats().triangles, 6);

    // the queue was cleared after drawing
    assert!(engine.scene_manager().gizmos().lines().is_empty());

    // a second frame with no new gizmos draws none
    backend.reset();
    engine.advance(1.0 / 60.0, &mut backend);
    assert_eq!(backend.gizmo_primitives, 0);
    assert_eq!(backend.draws[0].instance_count, 3);
}

#[test]
fn unloading_the_active_scene_stops_its_rendering() {
    let mut engine = engine_with_scene("a");
    engine.scene_manager_mut().create_scene("b");
    engine.scene_manager_mut().load_scene("b").unwrap();

    let texture = engine.textures_mut().register("dot", 8, 8);
    for name in ["a", "b"] {
        engine
            .scene_manager_mut()
            .with_scene(name, |ctx| {
                ctx.spawn_sprite(Transform2D::default(), SpriteRenderer::new(texture));
            })
            .unwrap();
    }
    engine
        .scene_manager_mut()
        .with_scene("b", |ctx| {
            let camera = ctx.spawn(Transform2D::default());
            ctx.add_camera(camera, Camera::new(400, 400)).unwrap();
        })
        .unwrap();

    let mut backend = RecordingBackend::default();
    engine.advance(1.0 / 60.0, &mut backend);
    // both scenes render their sprite through scene b's camera
    assert_eq!(backend.total_instances(), 2);

    engine.scene_manager_mut().unload_scene("a").unwrap();
    backend.reset();
    engine.advance(1.0 / 60.0, &mut backend);
    assert_eq!(backend.total_instances(), 1);
}

#[test]
fn raycast_through_the_scene_reports_the_entity() {
    let mut engine = engine_with_scene("ray");
    let target = engine
        .scene_manager_mut()
        .with_scene("ray", |ctx| {
            let entity = ctx.spawn(Transform2D::from_position_scale(
                Vec2::new(4.0, 0.0),
                Vec2::new(2.0, 2.0),
            ));
            ctx.add_box_collider(entity).unwrap();
            entity
        })
        .unwrap();

    // step once so the query structures see the new shape
    let mut backend = RecordingBackend::default();
    engine.advance(1.0 / 50.0, &mut backend);

    let hit = engine
        .scene_manager()
        .physics()
        .raycast(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), 50.0)
        .unwrap()
        .expect("ray should strike the box");
    assert_eq!(hit.entity, target);
    assert!((hit.distance - 3.0).abs() < 1e-2);
}

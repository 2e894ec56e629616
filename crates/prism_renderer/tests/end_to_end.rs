//! Whole-pipeline tests: camera, scene, lights and renderer together.

use prism_renderer::{
    rotation_y, translation, AmbientLight, Camera, Color, Cone, Cylinder, ImageBuffer, ObjectId,
    Plane, PointLight, RenderConfig, Renderer, Shading, Sphere, Surface, TriangleMesh, Vec3,
    Viewport,
};

const SIZE: u32 = 41;
const CENTER: u32 = SIZE / 2;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Unit green sphere at the origin seen from (0, 0, -3).
fn green_sphere_renderer() -> Renderer {
    init_logging();
    let camera = Camera::perspective(Vec3::new(0.0, 0.0, -3.0), Vec3::Z, Vec3::X);
    let mut renderer = Renderer::new(
        SIZE,
        SIZE,
        camera,
        Viewport::new(1.0, 1.0),
        AmbientLight::new(0.3, Color::ONE),
    );
    renderer.add_object(Sphere::new(
        Vec3::ZERO,
        1.0,
        Surface::new(Color::new(0.0, 1.0, 0.0), 1.0),
    ));
    renderer
}

fn busy_renderer() -> Renderer {
    init_logging();
    let camera = Camera::perspective(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, Vec3::X);
    let mut renderer = Renderer::new(
        48,
        36,
        camera,
        Viewport::new(2.0, 1.5),
        AmbientLight::default(),
    );

    renderer.add_light(PointLight::new(Vec3::new(0.0, 5.0, 0.0), 0.7, Color::ONE));
    renderer.add_light(PointLight::new(Vec3::new(-0.5, 0.5, -2.0), 0.7, Color::ONE));

    renderer.add_object(Plane::new(
        Vec3::new(0.0, -1.4, 0.0),
        Vec3::Y,
        Surface::new(Color::splat(0.5), 0.0),
    ));
    renderer.add_object(
        Cone::new(
            Vec3::new(0.9, 1.3, 1.0),
            Vec3::new(0.9, -1.0, 1.0),
            0.26,
            Surface::new(Color::new(1.0, 0.0, 0.0), 1.0),
        )
        .unwrap(),
    );
    renderer.add_object(
        Cylinder::new(
            Vec3::new(-1.2, 1.0, -1.2),
            Vec3::new(-1.2, -1.0, -1.2),
            0.15,
            Surface::new(Color::new(0.0, 0.0, 1.0), 1.0),
        )
        .unwrap(),
    );
    renderer.add_object(Sphere::new(
        Vec3::new(-0.7, -0.5, 2.0),
        1.2,
        Surface::new(Color::new(0.0, 1.0, 0.0), 1.0),
    ));
    renderer.add_object(TriangleMesh::new(
        Vec3::new(1.5, 0.5, -1.0),
        vec![
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
        ],
        vec![[0, 1, 2]],
        None,
        Surface::new(Color::new(1.0, 1.0, 0.0), 0.5),
    ));
    renderer
}

#[test]
fn test_sphere_center_pixel() {
    let mut renderer = green_sphere_renderer();
    renderer.add_light(PointLight::new(Vec3::new(0.0, 5.0, 0.0), 0.7, Color::ONE));

    let rec = renderer.trace_pixel(CENTER, CENTER).unwrap();
    assert!(rec.hit);
    assert!((rec.t - 2.0).abs() < 1e-3);
    assert!((rec.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-3);

    let mut image = ImageBuffer::new(SIZE, SIZE);
    renderer.render(&mut image, true).unwrap();

    // The light overhead sits behind the tangent plane at this point, so
    // only the ambient term reaches it. The lit case is covered by
    // test_facing_light_brightens_sphere.
    let rgba = image.get(CENTER, SIZE - 1 - CENTER);
    assert_eq!(rgba[0], 0);
    assert_eq!(rgba[1], (0.3f32 * 255.0) as u8);
    assert_eq!(rgba[2], 0);
    assert_eq!(rgba[3], 255);
}

#[test]
fn test_facing_light_brightens_sphere() {
    let mut renderer = green_sphere_renderer();
    renderer.add_light(PointLight::new(Vec3::new(0.0, 5.0, 0.0), 0.7, Color::ONE));
    let ambient_only = renderer.pixel_color(CENTER, CENTER).unwrap();

    // In front of the sphere, so the center pixel sees it
    renderer.add_light(PointLight::new(Vec3::new(0.0, 5.0, -5.0), 0.7, Color::ONE));
    let lit = renderer.pixel_color(CENTER, CENTER).unwrap();

    assert_eq!(ambient_only[1], (0.3f32 * 255.0) as u8);
    assert!(lit[1] > ambient_only[1]);
    assert_eq!(lit[0], 0);
}

#[test]
fn test_pixel_outside_silhouette_is_background() {
    let renderer = green_sphere_renderer();

    let rec = renderer.trace_pixel(0, 0).unwrap();
    assert!(!rec.hit);
    assert_eq!(rec.t, -1.0);

    let mut image = ImageBuffer::new(SIZE, SIZE);
    renderer.render(&mut image, false).unwrap();
    assert_eq!(image.get(0, 0), [0, 0, 0, 255]);
    assert_eq!(image.get(SIZE - 1, SIZE - 1), [0, 0, 0, 255]);
}

#[test]
fn test_parallel_matches_sequential() {
    let renderer = busy_renderer();

    let mut parallel = ImageBuffer::new(48, 36);
    let mut sequential = ImageBuffer::new(48, 36);
    renderer.render(&mut parallel, true).unwrap();
    renderer.render(&mut sequential, false).unwrap();

    assert_eq!(parallel, sequential);
    assert!(parallel.as_bytes().chunks(4).any(|px| px[..3] != [0, 0, 0]));
}

#[test]
fn test_supersampling_is_deterministic() {
    let renderer =
        busy_renderer().with_config(RenderConfig::default().with_samples_per_pixel(4));

    let mut parallel = ImageBuffer::new(48, 36);
    let mut sequential = ImageBuffer::new(48, 36);
    renderer.render(&mut parallel, true).unwrap();
    renderer.render(&mut sequential, false).unwrap();

    assert_eq!(parallel, sequential);
}

#[test]
fn test_lambert_shading_renders() {
    let renderer = busy_renderer().with_config(
        RenderConfig::default()
            .with_shading(Shading::Lambert)
            .with_background(Color::splat(0.5)),
    );

    let mut image = ImageBuffer::new(48, 36);
    renderer.render(&mut image, true).unwrap();
    assert_eq!(image.get(0, 0), [127, 127, 127, 255]);
}

#[test]
fn test_render_rejects_wrong_buffer() {
    let renderer = green_sphere_renderer();
    let mut image = ImageBuffer::new(SIZE + 1, SIZE);
    assert!(renderer.render(&mut image, true).is_err());
}

#[test]
fn test_select_object() {
    let mut renderer = green_sphere_renderer();

    assert_eq!(renderer.select_object(CENTER, CENTER).unwrap(), Some(ObjectId(0)));
    assert_eq!(renderer.select_object(0, 0).unwrap(), None);

    // Move the sphere out of view, then put it back
    let sphere = ObjectId(0);
    renderer
        .object_mut(sphere)
        .unwrap()
        .translate(&translation(5.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(renderer.select_object(CENTER, CENTER).unwrap(), None);

    renderer.object_mut(sphere).unwrap().reset().unwrap();
    assert_eq!(renderer.select_object(CENTER, CENTER).unwrap(), Some(sphere));
}

#[test]
fn test_camera_edits_between_renders() {
    let mut renderer = green_sphere_renderer();

    renderer.camera_mut().pan(Vec3::new(3.0, 0.0, 0.0));
    assert_eq!(renderer.select_object(CENTER, CENTER).unwrap(), None);

    renderer.camera_mut().reset();
    assert_eq!(renderer.select_object(CENTER, CENTER).unwrap(), Some(ObjectId(0)));

    // Orbiting about the sphere keeps it in the middle of the frame
    renderer.camera_mut().rotate(&rotation_y(0.8)).unwrap();
    let rec = renderer.trace_pixel(CENTER, CENTER).unwrap();
    assert!(rec.hit);
    assert!((rec.t - 2.0).abs() < 1e-3);
}

#[test]
fn test_render_config_serde() {
    let config = RenderConfig::default()
        .with_samples_per_pixel(8)
        .with_background(Color::new(0.1, 0.2, 0.3))
        .with_shading(Shading::Lambert);

    let json = serde_json::to_string(&config).unwrap();
    let loaded: RenderConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, config);

    // Missing fields fall back to defaults
    let partial: RenderConfig = serde_json::from_str(r#"{"samples_per_pixel": 4}"#).unwrap();
    assert_eq!(partial.samples_per_pixel, 4);
    assert_eq!(partial.background, Color::ZERO);
    assert_eq!(partial.shading, Shading::BlinnPhong);
}

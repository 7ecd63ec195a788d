//! End-to-end checks of the scroll engine against the built-in story.

use std::time::{Duration, Instant};

use scrollytell::core::{
    animation::{element_state, lifecycle, Motion, NARRATION_WINDOW},
    camera::interpolate_camera,
    catalog::{CameraPose, Catalog, Scene},
    citations::SourceQuery,
    resolver::resolve_scene,
    sampler::{SamplerConfig, ScrollSampler},
};

fn catalog() -> Catalog {
    Catalog::builtin().expect("built-in story is valid")
}

fn pose_distance(a: &CameraPose, b: &CameraPose) -> f64 {
    a.pos.distance(b.pos) + a.look_at.distance(b.look_at) + (a.fov - b.fov).abs()
}

/// The built-in scenes, each given its own distinct camera pose.
fn posed_scenes(catalog: &Catalog) -> Vec<Scene> {
    catalog
        .scenes()
        .iter()
        .enumerate()
        .map(|(i, scene)| {
            let k = i as f64;
            let mut scene = scene.clone();
            scene.camera = CameraPose::new(
                [k * 1.5 - 4.0, (k * 0.9).sin() * 2.0, 5.0 + k],
                [k * 0.2, 0.0, 0.0],
            )
            .with_fov(40.0 + k * 4.0);
            scene
        })
        .collect()
}

#[test]
fn opening_frame_shows_first_scene_with_nothing_revealed() {
    let catalog = catalog();
    let scenes = catalog.scenes();
    let r = resolve_scene(0.0, scenes);
    assert_eq!(scenes[r.index].id, "SC_00");
    assert_eq!(r.intra, 0.0);
    let lines = scenes[0].narration_lines.len();
    let first = element_state(r.intra, 0, lines, NARRATION_WINDOW, Motion::Full);
    assert!(!first.visible);
}

#[test]
fn mid_first_scene_holds_its_camera_and_reveals_narration() {
    let catalog = catalog();
    let scenes = catalog.scenes();
    let r = resolve_scene(0.05, scenes);
    assert_eq!(r.index, 0);
    assert!((r.intra - 0.5556).abs() < 1e-3);
    assert_eq!(interpolate_camera(0.05, scenes), scenes[0].camera);
    let lines = scenes[0].narration_lines.len();
    let revealed = (0..lines)
        .filter(|&i| element_state(r.intra, i, lines, NARRATION_WINDOW, Motion::Full).visible)
        .count();
    assert!(revealed >= 1);
}

#[test]
fn boundary_belongs_to_the_later_scene() {
    let catalog = catalog();
    let r = resolve_scene(0.09, catalog.scenes());
    assert_eq!(catalog.scenes()[r.index].id, "SC_01");
    assert_eq!(r.intra, 0.0);
}

#[test]
fn every_progress_value_resolves_inside_its_scene() {
    let catalog = catalog();
    let scenes = catalog.scenes();
    for step in 0..=1000 {
        let p = f64::from(step) / 1000.0;
        let r = resolve_scene(p, scenes);
        let range = scenes[r.index].range;
        let last = r.index == scenes.len() - 1;
        assert!(range.contains(p) || (last && p >= range.start), "p = {p}");
    }
    assert_eq!(resolve_scene(1.0, scenes).index, scenes.len() - 1);
}

#[test]
fn camera_never_pops_at_scene_boundaries() {
    let catalog = catalog();
    let scenes = posed_scenes(&catalog);
    for pair in scenes.windows(2) {
        assert!(pose_distance(&pair[0].camera, &pair[1].camera) > 1.0);
    }
    for scene in &scenes[1..] {
        let b = scene.range.start;
        let before = interpolate_camera(b - 1e-4, &scenes);
        let after = interpolate_camera(b + 1e-4, &scenes);
        assert!(pose_distance(&before, &after) < 5e-2, "pop at {}", scene.id);
    }
}

#[test]
fn visual_lifecycle_hits_its_keyframes() {
    assert!(lifecycle(0.0, Motion::Full).opacity.abs() < 1e-12);
    assert!((lifecycle(0.2, Motion::Full).opacity - 1.0).abs() < 1e-12);
    assert!((lifecycle(0.8, Motion::Full).opacity - 1.0).abs() < 1e-12);
    assert!(lifecycle(1.0, Motion::Full).opacity.abs() < 1e-12);
}

#[test]
fn ocean_search_matches_only_sources_mentioning_ocean() {
    let catalog = catalog();
    let hits = SourceQuery::new("OCEAN").filter(&catalog);
    assert!(hits.iter().any(|(_, s)| s.id == "S_JAMBECK_2015_OCEAN"));
    for (_, s) in &hits {
        let text = [&s.org, &s.title, &s.quote, &s.year]
            .iter()
            .map(|f| f.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        assert!(text.contains("ocean"));
    }
    // Numbers stay canonical under a filter.
    for (n, s) in &hits {
        assert_eq!(catalog.citation_number(&s.id), Some(*n));
    }
}

#[test]
fn scene_jump_is_not_mistaken_for_user_scroll() {
    let catalog = catalog();
    let scenes = catalog.scenes();
    let mut sampler = ScrollSampler::new(scenes.len(), 40, SamplerConfig::default());
    let t0 = Instant::now();
    sampler.jump_to_scene(scenes, 3);
    assert!(sampler.is_auto_scrolling());

    let mut now = t0;
    for _ in 0..400 {
        now += Duration::from_millis(33);
        sampler.tick(scenes, now);
    }
    assert!(!sampler.is_auto_scrolling());
    let target = scenes[3].range.start + 0.01;
    assert!((sampler.raw_progress() - target).abs() < 1e-2);

    // Long idle after arriving: a programmatic landing never arms a snap.
    let settled = sampler.offset_rows();
    sampler.tick(scenes, now + Duration::from_secs(5));
    assert_eq!(sampler.offset_rows(), settled);
    assert!((sampler.progress() - sampler.raw_progress()).abs() < 1e-3);
}

#[test]
fn user_scroll_interrupts_a_jump() {
    let catalog = catalog();
    let scenes = catalog.scenes();
    let mut sampler = ScrollSampler::new(scenes.len(), 40, SamplerConfig::default());
    let now = Instant::now();
    sampler.jump_to_scene(scenes, 5);
    sampler.tick(scenes, now);
    sampler.scroll_by(-3.0, now);
    assert!(!sampler.is_auto_scrolling());
}

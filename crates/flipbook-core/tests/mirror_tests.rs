use flipbook_core::{
    ClipConfig, ClipId, ConfigError, Event, Inputs, MirrorConfig, Rgba, RenderKind, Stage,
};

fn sprite_clip(frame_count: u32) -> ClipConfig {
    ClipConfig {
        frame_count,
        fps: 10.0,
        looping: true,
        play_on_awake: false,
        ..Default::default()
    }
}

fn mesh_clip(frame_count: u32) -> ClipConfig {
    ClipConfig {
        render: RenderKind::Mesh,
        ..sprite_clip(frame_count)
    }
}

fn red() -> Rgba {
    Rgba::new(1.0, 0.0, 0.0, 1.0)
}

#[test]
fn mirrors_frame_and_frame_absence() {
    let mut stage = Stage::new();
    let source = stage.add_clip(sprite_clip(10)).unwrap();
    let dependent = stage.add_clip(sprite_clip(10)).unwrap();
    stage
        .add_mirror(MirrorConfig::new(source, vec![dependent]))
        .unwrap();

    stage.clip_mut(source).unwrap().show_frame(7);
    stage.step(0.0, Inputs::default());
    assert_eq!(stage.clip(dependent).unwrap().frame(), Some(7));

    stage.clip_mut(source).unwrap().hide();
    stage.step(0.0, Inputs::default());
    assert_eq!(stage.clip(dependent).unwrap().frame(), None);
}

#[test]
fn disabled_attributes_never_copy_while_enabled_ones_still_do() {
    let mut stage = Stage::new();
    let source = stage.add_clip(sprite_clip(10)).unwrap();
    let dependent = stage.add_clip(sprite_clip(10)).unwrap();
    let mut cfg = MirrorConfig::new(source, vec![dependent]);
    cfg.mirror_color = false;
    stage.add_mirror(cfg).unwrap();

    {
        let src = stage.clip_mut(source).unwrap();
        src.show_frame(3);
        src.set_flip_x(true);
        src.set_color(red());
    }
    stage.step(0.0, Inputs::default());

    let dep = stage.clip(dependent).unwrap();
    assert_eq!(dep.frame(), Some(3));
    assert!(dep.flip_x());
    assert_eq!(dep.color(), Rgba::WHITE);
}

#[test]
fn dangling_dependent_is_skipped_and_others_still_update() {
    let mut stage = Stage::new();
    let source = stage.add_clip(sprite_clip(10)).unwrap();
    let gone = stage.add_clip(sprite_clip(10)).unwrap();
    let kept = stage.add_clip(sprite_clip(10)).unwrap();
    stage
        .add_mirror(MirrorConfig::new(source, vec![gone, kept]))
        .unwrap();
    stage.remove_clip(gone);

    stage.clip_mut(source).unwrap().show_frame(5);
    stage.step(0.0, Inputs::default());
    assert_eq!(stage.clip(kept).unwrap().frame(), Some(5));
}

#[test]
fn dangling_source_makes_the_step_a_no_op() {
    let mut stage = Stage::new();
    let source = stage.add_clip(sprite_clip(10)).unwrap();
    let dependent = stage.add_clip(sprite_clip(10)).unwrap();
    stage
        .add_mirror(MirrorConfig::new(source, vec![dependent]))
        .unwrap();
    stage.remove_clip(source);

    stage.step(0.0, Inputs::default());
    assert_eq!(stage.clip(dependent).unwrap().frame(), None);
}

#[test]
fn render_kind_mismatch_skips_color_and_order_but_not_frame_or_flip() {
    let mut stage = Stage::new();
    let source = stage.add_clip(sprite_clip(10)).unwrap();
    let mesh_dep = stage.add_clip(mesh_clip(10)).unwrap();
    let sprite_dep = stage.add_clip(sprite_clip(10)).unwrap();
    stage
        .add_mirror(MirrorConfig::new(source, vec![mesh_dep, sprite_dep]))
        .unwrap();

    {
        let src = stage.clip_mut(source).unwrap();
        src.show_frame(3);
        src.set_flip_y(true);
        src.set_color(red());
        src.set_sort_order(5);
    }
    let out = stage.step(0.0, Inputs::default()).clone();

    // The mismatched dependent still gets frame and flip.
    let mesh = stage.clip(mesh_dep).unwrap();
    assert_eq!(mesh.frame(), Some(3));
    assert!(mesh.flip_y());
    assert_eq!(mesh.color(), Rgba::WHITE);
    assert_eq!(mesh.sort_order(), 0);
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, Event::Error { .. })));

    // The sprite dependent is unaffected by its sibling's mismatch.
    let sprite = stage.clip(sprite_dep).unwrap();
    assert_eq!(sprite.color(), red());
    assert_eq!(sprite.sort_order(), 5);
}

#[test]
fn inactive_mirror_copies_nothing() {
    let mut stage = Stage::new();
    let source = stage.add_clip(sprite_clip(10)).unwrap();
    let dependent = stage.add_clip(sprite_clip(10)).unwrap();
    let mirror = stage
        .add_mirror(MirrorConfig::new(source, vec![dependent]))
        .unwrap();

    stage.set_mirror_active(mirror, false);
    stage.clip_mut(source).unwrap().show_frame(2);
    stage.step(0.0, Inputs::default());
    assert_eq!(stage.clip(dependent).unwrap().frame(), None);

    stage.set_mirror_active(mirror, true);
    stage.step(0.0, Inputs::default());
    assert_eq!(stage.clip(dependent).unwrap().frame(), Some(2));
}

#[test]
fn dependents_are_slaved_and_never_self_advance() {
    let mut stage = Stage::new();
    let source = stage.add_clip(sprite_clip(10)).unwrap();
    // Configured to free-run, but mirror construction takes that away.
    let dependent = stage
        .add_clip(ClipConfig {
            frame_count: 10,
            fps: 10.0,
            looping: true,
            play_on_awake: true,
            ..Default::default()
        })
        .unwrap();
    stage
        .add_mirror(MirrorConfig::new(source, vec![dependent]))
        .unwrap();

    stage.clip_mut(source).unwrap().show_frame(2);
    for _ in 0..5 {
        stage.step(1.0, Inputs::default());
    }
    assert_eq!(stage.clip(dependent).unwrap().frame(), Some(2));
    assert!(!stage.clip(dependent).unwrap().is_playing());
    assert!(!stage.clip(dependent).unwrap().is_looping());
}

#[test]
fn construction_tolerates_dangling_dependents() {
    let mut stage = Stage::new();
    let source = stage.add_clip(sprite_clip(10)).unwrap();
    let gone = stage.add_clip(sprite_clip(10)).unwrap();
    let kept = stage.add_clip(sprite_clip(10)).unwrap();
    stage.remove_clip(gone);

    // A dependent that no longer resolves is a warning at construction, not
    // an error; the resolvable sibling is still slaved and mirrored.
    assert!(stage
        .add_mirror(MirrorConfig::new(source, vec![gone, kept]))
        .is_ok());
    assert!(!stage.clip(kept).unwrap().is_active());

    stage.clip_mut(source).unwrap().show_frame(4);
    stage.step(0.0, Inputs::default());
    assert_eq!(stage.clip(kept).unwrap().frame(), Some(4));
}

#[test]
fn mirror_construction_rejects_bad_configs() {
    let mut stage = Stage::new();
    let source = stage.add_clip(sprite_clip(10)).unwrap();

    assert_eq!(
        stage.add_mirror(MirrorConfig::new(source, vec![])),
        Err(ConfigError::NoDependents)
    );
    assert_eq!(
        stage.add_mirror(MirrorConfig::new(ClipId(999), vec![source])),
        Err(ConfigError::UnknownClip { id: ClipId(999) })
    );
}

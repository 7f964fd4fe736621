use seqplot::api::{HeadlessHost, PanelConfig, SequencePanel};
use seqplot::core::Viewport;
use seqplot::render::{NullRenderer, RebuildOutcome, RenderFrame};

fn mounted(
    config: PanelConfig,
    values: Vec<f64>,
    size: Viewport,
) -> (SequencePanel<NullRenderer>, HeadlessHost<RenderFrame>) {
    let mut host = HeadlessHost::new(size);
    let panel = SequencePanel::mount(NullRenderer::default(), config, values, &mut host)
        .expect("panel");
    (panel, host)
}

#[test]
fn mount_requests_paint_and_first_paint_rebuilds() {
    let (mut panel, mut host) = mounted(
        PanelConfig::default(),
        vec![0.0, 1.0, 0.5],
        Viewport::new(400, 300),
    );
    assert_eq!(host.take_repaint_requests(), 1);
    assert!(panel.cache().is_invalidated());

    assert!(panel.paint(&mut host));
    assert_eq!(panel.cache().generation(), 1);
    assert_eq!(host.blit_count, 1);
    assert_eq!(host.last_blit().map(|frame| frame.viewport), Some(Viewport::new(400, 300)));
}

#[test]
fn repaint_without_changes_reuses_bitmap() {
    let (mut panel, mut host) = mounted(
        PanelConfig::default(),
        vec![0.0, 1.0, 0.5],
        Viewport::new(400, 300),
    );
    panel.paint(&mut host);
    panel.paint(&mut host);
    panel.paint(&mut host);

    assert_eq!(panel.cache().generation(), 1);
    assert_eq!(panel.renderer().render_count, 1);
    assert_eq!(panel.cache().stats().blits, 3);
}

#[test]
fn resize_drag_resize_keeps_bitmap_in_step_with_state() {
    let (mut panel, mut host) = mounted(
        PanelConfig::default(),
        vec![0.0, 1.0, 0.5],
        Viewport::new(400, 300),
    );
    panel.paint(&mut host);

    host.set_client_size(Viewport::new(600, 400));
    panel.on_resize(&mut host);
    assert!(panel.cache().is_invalidated());
    panel.paint(&mut host);
    assert_eq!(host.last_blit().map(|frame| frame.viewport), Some(Viewport::new(600, 400)));

    let mapper = panel.mapper().expect("mapper");
    let marker = mapper.map(2, 0.5);
    panel.on_pointer_down(&mut host, marker.x, marker.y);
    panel.on_pointer_move(&mut host, marker.x, mapper.value_to_y(0.75), true);
    panel.on_pointer_up(&mut host, marker.x, mapper.value_to_y(0.75));
    assert!((panel.values()[2] - 0.75).abs() <= 1e-9);

    host.set_client_size(Viewport::new(300, 200));
    panel.on_resize(&mut host);
    panel.paint(&mut host);

    let frame = host.last_blit().expect("frame");
    let mapper = panel.mapper().expect("mapper");
    assert_eq!(frame.viewport, Viewport::new(300, 200));
    assert_eq!(frame.markers.len(), 3);
    for (index, (marker, value)) in frame.markers.iter().zip(panel.values()).enumerate() {
        let expected = mapper.map(index, *value);
        assert!((marker.center.x - expected.x).abs() <= 1e-9);
        assert!((marker.center.y - expected.y).abs() <= 1e-9);
    }
}

#[test]
fn zero_sized_surface_keeps_previous_bitmap_until_next_resize() {
    let (mut panel, mut host) = mounted(
        PanelConfig::default(),
        vec![0.0, 1.0, 0.5],
        Viewport::new(400, 300),
    );
    panel.paint(&mut host);

    host.set_client_size(Viewport::new(0, 0));
    panel.on_resize(&mut host);
    assert_eq!(panel.rebuild_if_invalidated(), RebuildOutcome::SkippedZeroSize);
    assert!(panel.cache().is_invalidated());
    assert!(panel.mapper().is_none());
    assert_eq!(panel.hit_test(50.0, 50.0), None);

    // Paint still shows the last good bitmap.
    assert!(panel.paint(&mut host));
    assert_eq!(host.last_blit().map(|frame| frame.viewport), Some(Viewport::new(400, 300)));
    assert_eq!(panel.cache().generation(), 1);

    host.set_client_size(Viewport::new(200, 150));
    panel.on_resize(&mut host);
    panel.paint(&mut host);
    assert_eq!(panel.cache().generation(), 2);
    assert_eq!(host.last_blit().map(|frame| frame.viewport), Some(Viewport::new(200, 150)));
}

#[test]
fn padding_larger_than_surface_is_treated_as_zero_size() {
    let (mut panel, mut host) = mounted(
        PanelConfig::default(),
        vec![0.0, 1.0],
        Viewport::new(80, 80),
    );
    assert_eq!(panel.rebuild_if_invalidated(), RebuildOutcome::SkippedZeroSize);
    assert!(!panel.paint(&mut host), "nothing committed yet");
    assert_eq!(panel.on_pointer_down(&mut host, 50.0, 50.0), seqplot::interaction::DragEffect::None);
}

#[test]
fn single_sample_panel_renders_one_marker() {
    let (mut panel, mut host) = mounted(
        PanelConfig::default(),
        vec![0.4],
        Viewport::new(300, 200),
    );
    assert!(panel.paint(&mut host));

    let frame = host.last_blit().expect("frame");
    assert!(frame.segments.is_empty());
    assert_eq!(frame.markers.len(), 1);
    assert!((frame.markers[0].center.x - 50.0).abs() <= 1e-9);

    let marker = frame.markers[0].center;
    let effect = panel.on_pointer_down(&mut host, marker.x, marker.y);
    assert_eq!(effect, seqplot::interaction::DragEffect::Started { index: 0 });
}

#[test]
fn empty_sequence_paints_decoration_only() {
    let (mut panel, mut host) = mounted(PanelConfig::default(), Vec::new(), Viewport::new(300, 200));
    assert!(panel.paint(&mut host));

    let frame = host.last_blit().expect("frame");
    assert!(frame.segments.is_empty());
    assert!(frame.markers.is_empty());
    assert!(!frame.rects.is_empty());
}

#[test]
fn replacing_values_invalidates_cache() {
    let (mut panel, mut host) = mounted(
        PanelConfig::default(),
        vec![0.0, 1.0, 0.5],
        Viewport::new(400, 300),
    );
    panel.paint(&mut host);

    panel.replace_values(vec![3.0, 1.0, 2.0, 4.0]).expect("replace");
    assert!(panel.cache().is_invalidated());
    panel.paint(&mut host);
    assert_eq!(host.last_blit().map(|frame| frame.segments.len()), Some(3));

    let err = panel.replace_values(vec![1.0, f64::NAN]).expect_err("nan sample");
    assert!(matches!(err, seqplot::PlotError::InvalidData(_)));
    assert_eq!(panel.values(), &[3.0, 1.0, 2.0, 4.0]);
}

#[test]
fn overflowing_value_span_is_rejected_and_panel_keeps_rendering() {
    let err = SequencePanel::new(
        NullRenderer::default(),
        PanelConfig::default(),
        vec![-1e308, 1e308],
        Viewport::new(400, 300),
    )
    .err()
    .expect("overflowing span");
    assert!(matches!(err, seqplot::PlotError::InvalidData(_)));

    let (mut panel, mut host) = mounted(
        PanelConfig::default(),
        vec![0.0, 1.0],
        Viewport::new(400, 300),
    );
    panel.paint(&mut host);
    assert!(panel.replace_values(vec![-1e308, 1e308]).is_err());
    assert_eq!(panel.values(), &[0.0, 1.0]);

    panel.replace_values(vec![-1e300, 1e300]).expect("wide but finite span");
    assert!(panel.rebuild_if_invalidated().is_rebuilt());
    assert!(panel.paint(&mut host));
    assert_eq!(host.last_blit().map(|frame| frame.markers.len()), Some(2));
}

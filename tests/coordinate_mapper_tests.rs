use approx::assert_abs_diff_eq;
use seqplot::PlotError;
use seqplot::core::{AxisConvention, CoordinateMapper, FixedScale, MappingConfig, Viewport};

fn mapping(axis_convention: AxisConvention, fixed_scale: Option<FixedScale>) -> MappingConfig {
    MappingConfig {
        padding: 40.0,
        axis_convention,
        fixed_scale,
    }
}

#[test]
fn bottom_up_and_top_down_mirror_each_other_inside_plot_area() {
    let values = [1.0, 3.0, 2.0, 5.0];
    let viewport = Viewport::new(680, 480);
    let up = CoordinateMapper::resolve(mapping(AxisConvention::BottomUp, None), viewport, &values)
        .expect("bottom-up");
    let down = CoordinateMapper::resolve(mapping(AxisConvention::TopDown, None), viewport, &values)
        .expect("top-down");

    let top = 40.0;
    let bottom = 440.0;
    for value in values {
        let y_up = up.value_to_y(value);
        let y_down = down.value_to_y(value);
        assert_abs_diff_eq!(y_up - top, bottom - y_down, epsilon = 1e-9);
    }

    assert_abs_diff_eq!(up.value_to_y(1.0), bottom, epsilon = 1e-9);
    assert_abs_diff_eq!(up.value_to_y(5.0), top, epsilon = 1e-9);
    assert_abs_diff_eq!(down.value_to_y(1.0), top, epsilon = 1e-9);
    assert_abs_diff_eq!(down.value_to_y(5.0), bottom, epsilon = 1e-9);
}

#[test]
fn data_driven_scale_x_spreads_indices_over_graph_width() {
    let values = [0.0; 5];
    let mapper = CoordinateMapper::resolve(
        mapping(AxisConvention::BottomUp, None),
        Viewport::new(480, 300),
        &values,
    )
    .expect("mapper");

    assert_abs_diff_eq!(mapper.layout().scale_x, 100.0, epsilon = 1e-12);
    assert_abs_diff_eq!(mapper.index_to_x(4), 440.0, epsilon = 1e-9);
}

#[test]
fn degenerate_range_maps_every_value_to_plot_bottom() {
    let values = [2.5, 2.5, 2.5];
    let mapper = CoordinateMapper::resolve(
        mapping(AxisConvention::BottomUp, None),
        Viewport::new(300, 300),
        &values,
    )
    .expect("mapper");

    // Unit fallback span: scale_y is the graph height itself.
    assert_abs_diff_eq!(mapper.layout().scale_y, 220.0, epsilon = 1e-12);
    assert_abs_diff_eq!(mapper.value_to_y(2.5), mapper.plot_bottom(), epsilon = 1e-12);
}

#[test]
fn fixed_scale_ignores_data_and_size() {
    let fixed = FixedScale::new(10.0, 200.0).with_value_origin(0.5);
    let small = CoordinateMapper::resolve(
        mapping(AxisConvention::TopDown, Some(fixed)),
        Viewport::new(200, 200),
        &[0.0, 1.0],
    )
    .expect("small");
    let large = CoordinateMapper::resolve(
        mapping(AxisConvention::TopDown, Some(fixed)),
        Viewport::new(1200, 900),
        &[-5.0, 8.0, 3.0],
    )
    .expect("large");

    assert_eq!(small.map(1, 0.75), large.map(1, 0.75));
    assert_abs_diff_eq!(small.value_to_y(0.5), 40.0, epsilon = 1e-12);
}

#[test]
fn invalid_fixed_scale_is_rejected() {
    let err = CoordinateMapper::resolve(
        mapping(AxisConvention::TopDown, Some(FixedScale::new(0.0, 1.0))),
        Viewport::new(200, 200),
        &[0.0],
    )
    .expect_err("zero scale_x");
    assert!(matches!(err, PlotError::InvalidConfig(_)));
}

use approx::assert_abs_diff_eq;
use chart_bars::bars::{
    BarGroupingType, BarRenderElement, BarRendererConfig, CornerStrategy, FilledBarRenderer,
    TargetLineConfig, TargetLineRenderer,
};
use chart_bars::core::{BarSeries, LinearScale, OrdinalAxis, PixelRect, Viewport};
use chart_bars::render::{RenderFrame, RoundedCorners};

fn assert_rect_close(actual: PixelRect, expected: (f64, f64, f64, f64)) {
    assert_abs_diff_eq!(actual.left, expected.0, epsilon = 1e-9);
    assert_abs_diff_eq!(actual.top, expected.1, epsilon = 1e-9);
    assert_abs_diff_eq!(actual.width, expected.2, epsilon = 1e-9);
    assert_abs_diff_eq!(actual.height, expected.3, epsilon = 1e-9);
}

fn yearly_axis() -> OrdinalAxis {
    OrdinalAxis::new(["2014", "2015", "2016"], 0.0, 300.0).expect("axis")
}

fn symmetric_scale() -> LinearScale {
    LinearScale::new(-5.0, 5.0, 200.0, 0.0).expect("scale")
}

fn yearly_series(values: &[(&str, Option<f64>)]) -> Vec<BarSeries> {
    vec![BarSeries::from_measures("sales", values.iter().copied())]
}

fn frame() -> RenderFrame {
    RenderFrame::new(Viewport::new(300, 200))
}

fn sync(
    renderer: &mut FilledBarRenderer,
    series: &[BarSeries],
    domain_axis: &OrdinalAxis,
    measure_axis: &LinearScale,
) -> chart_bars::bars::SyncStats {
    let prepared = renderer.preprocess(series).expect("preprocess");
    renderer.update(&prepared, domain_axis, measure_axis)
}

#[test]
fn single_series_bars_grow_from_the_measure_axis() {
    let mut renderer = FilledBarRenderer::new(BarRendererConfig::default()).expect("renderer");
    let series = yearly_series(&[
        ("2014", Some(5.0)),
        ("2015", Some(-3.0)),
        ("2016", Some(0.0)),
    ]);

    let stats = sync(&mut renderer, &series, &yearly_axis(), &symmetric_scale());
    assert_eq!(stats.created, 3);
    assert_eq!(renderer.element_count(), 3);

    let mut start = frame();
    renderer.paint(&mut start, 0.0);
    assert!(start.stacks.is_empty(), "collapsed bars draw nothing");

    let mut end = frame();
    renderer.paint(&mut end, 1.0);
    assert_eq!(end.stacks.len(), 2, "the zero-height 2016 bar is skipped");
    assert_rect_close(end.stacks[0].stack.segments[0].bounds, (0.0, 0.0, 100.0, 100.0));
    assert_rect_close(end.stacks[1].stack.segments[0].bounds, (100.0, 100.0, 100.0, 60.0));
    assert!(end.stacks.iter().all(|command| command.clip_bounds.is_none()));

    let zero = renderer
        .element("2016____defaultKey____pos__00")
        .expect("2016 element");
    assert_rect_close(zero.target().bounds(), (200.0, 100.0, 100.0, 0.0));
}

#[test]
fn stacked_series_share_one_stack_with_padding() {
    let config = BarRendererConfig::new(BarGroupingType::Stacked);
    let mut renderer = FilledBarRenderer::new(config).expect("renderer");
    let series = vec![
        BarSeries::from_measures("s1", [("A", Some(10.0))]),
        BarSeries::from_measures("s2", [("A", Some(20.0))]),
    ];
    let domain_axis = OrdinalAxis::new(["A"], 0.0, 100.0).expect("axis");
    let measure_axis = LinearScale::new(0.0, 30.0, 300.0, 0.0).expect("scale");

    sync(&mut renderer, &series, &domain_axis, &measure_axis);
    let mut painted = frame();
    renderer.paint(&mut painted, 1.0);

    assert_eq!(painted.stacks.len(), 1);
    let stack = &painted.stacks[0].stack;
    assert_eq!(stack.segments.len(), 2);
    assert_rect_close(stack.segments[0].bounds, (0.0, 100.0, 100.0, 200.0));
    assert_rect_close(stack.segments[1].bounds, (0.0, 0.0, 100.0, 99.0));
    assert_rect_close(stack.full_stack_rect, (-1.0, -1.0, 102.0, 301.0));
    assert_eq!(stack.stacked_bar_padding_px, 1.0);
}

#[test]
fn repeated_update_with_same_data_is_stable() {
    let mut renderer = FilledBarRenderer::new(BarRendererConfig::default()).expect("renderer");
    let series = yearly_series(&[("2014", Some(5.0)), ("2015", Some(-3.0))]);
    let domain_axis = yearly_axis();
    let measure_axis = symmetric_scale();

    sync(&mut renderer, &series, &domain_axis, &measure_axis);
    let first_targets: Vec<PixelRect> = renderer
        .elements()
        .map(|element| element.target().bounds())
        .collect();
    let first_keys: Vec<String> = renderer.current_keys().map(str::to_owned).collect();

    let stats = sync(&mut renderer, &series, &domain_axis, &measure_axis);
    assert_eq!(stats.created, 0);
    assert_eq!(stats.retired, 0);
    assert_eq!(stats.updated, 2);

    let second_targets: Vec<PixelRect> = renderer
        .elements()
        .map(|element| element.target().bounds())
        .collect();
    let second_keys: Vec<String> = renderer.current_keys().map(str::to_owned).collect();
    assert_eq!(first_targets, second_targets);
    assert_eq!(first_keys, second_keys);
}

#[test]
fn removed_datum_animates_out_then_is_cleaned_up() {
    let mut renderer = FilledBarRenderer::new(BarRendererConfig::default()).expect("renderer");
    let domain_axis = yearly_axis();
    let measure_axis = symmetric_scale();

    sync(
        &mut renderer,
        &yearly_series(&[("2014", Some(5.0)), ("2015", Some(-3.0))]),
        &domain_axis,
        &measure_axis,
    );
    renderer.paint(&mut frame(), 1.0);

    let stats = sync(
        &mut renderer,
        &yearly_series(&[("2014", Some(5.0))]),
        &domain_axis,
        &measure_axis,
    );
    assert_eq!(stats.retired, 1);
    assert_eq!(renderer.current_keys().count(), 1);

    let retiring = renderer
        .elements()
        .find(|element| element.is_animating_out())
        .expect("retiring element");
    assert_eq!(retiring.binding().series_id, "sales");
    assert_rect_close(retiring.target().bounds(), (150.0, 100.0, 0.0, 0.0));

    let mut halfway = frame();
    renderer.paint(&mut halfway, 0.5);
    assert_eq!(halfway.stacks.len(), 2);
    assert_rect_close(halfway.stacks[1].stack.segments[0].bounds, (125.0, 100.0, 50.0, 30.0));

    let mut done = frame();
    renderer.paint(&mut done, 1.0);
    assert_eq!(done.stacks.len(), 1);
    assert_eq!(renderer.element_count(), 1);
    assert_eq!(renderer.stack_keys().count(), 1);
}

#[test]
fn returning_datum_revives_retiring_element() {
    let mut renderer = FilledBarRenderer::new(BarRendererConfig::default()).expect("renderer");
    let domain_axis = yearly_axis();
    let measure_axis = symmetric_scale();
    let both = yearly_series(&[("2014", Some(5.0)), ("2015", Some(-3.0))]);

    sync(&mut renderer, &both, &domain_axis, &measure_axis);
    renderer.paint(&mut frame(), 1.0);
    sync(
        &mut renderer,
        &yearly_series(&[("2014", Some(5.0))]),
        &domain_axis,
        &measure_axis,
    );
    renderer.paint(&mut frame(), 0.5);

    let stats = sync(&mut renderer, &both, &domain_axis, &measure_axis);
    assert_eq!(stats.created, 0);
    assert_eq!(stats.updated, 2);
    assert!(renderer.elements().all(|element| !element.is_animating_out()));

    renderer.paint(&mut frame(), 1.0);
    assert_eq!(renderer.element_count(), 2);
}

#[test]
fn null_measure_retires_existing_bar_and_never_creates_one() {
    let mut renderer = FilledBarRenderer::new(BarRendererConfig::default()).expect("renderer");
    let domain_axis = yearly_axis();
    let measure_axis = symmetric_scale();

    let stats = sync(
        &mut renderer,
        &yearly_series(&[("2014", Some(-5.0)), ("2015", None)]),
        &domain_axis,
        &measure_axis,
    );
    assert_eq!(stats.created, 1);
    assert_eq!(renderer.element_count(), 1);

    let stats = sync(
        &mut renderer,
        &yearly_series(&[("2014", None), ("2015", None)]),
        &domain_axis,
        &measure_axis,
    );
    assert_eq!(stats.updated, 1);
    assert_eq!(stats.retired, 0);
    assert!(
        renderer
            .elements()
            .all(|element| element.target().measure_is_null())
    );

    renderer.paint(&mut frame(), 1.0);
    assert_eq!(renderer.element_count(), 0);
    assert_eq!(renderer.stack_keys().count(), 0);
}

#[test]
fn draw_bounds_clip_stacks_along_domain_axis() {
    let mut renderer = FilledBarRenderer::new(BarRendererConfig::default()).expect("renderer");
    renderer.set_draw_bounds(Some(PixelRect::new(0.0, 0.0, 150.0, 200.0)));
    sync(
        &mut renderer,
        &yearly_series(&[
            ("2014", Some(5.0)),
            ("2015", Some(-3.0)),
            ("2016", Some(2.0)),
        ]),
        &yearly_axis(),
        &symmetric_scale(),
    );

    let mut painted = frame();
    renderer.paint(&mut painted, 1.0);
    assert_eq!(painted.stacks.len(), 2, "2016 lies entirely outside");
    assert!(painted.stacks[0].clip_bounds.is_none());
    let clip = painted.stacks[1].clip_bounds.expect("clip");
    assert_rect_close(clip, (100.0, 100.0, 50.0, 60.0));
}

#[test]
fn corner_radius_is_capped_and_points_away_from_axis() {
    let config = BarRendererConfig::default()
        .with_corner_strategy(CornerStrategy::Constant { radius_px: 80.0 });
    let mut renderer = FilledBarRenderer::new(config).expect("renderer");
    sync(
        &mut renderer,
        &yearly_series(&[("2014", Some(5.0)), ("2015", Some(-3.0))]),
        &yearly_axis(),
        &symmetric_scale(),
    );

    let mut painted = frame();
    renderer.paint(&mut painted, 1.0);
    let positive = &painted.stacks[0].stack;
    assert_eq!(positive.radius_px, 50.0);
    assert_eq!(
        positive.rounded_corners,
        RoundedCorners {
            top_left: true,
            top_right: true,
            bottom_left: false,
            bottom_right: false,
        }
    );
    let negative = &painted.stacks[1].stack;
    assert!(negative.rounded_corners.bottom_left && negative.rounded_corners.bottom_right);
    assert!(!negative.rounded_corners.top_left);
}

#[test]
fn overcrowded_slot_floors_bars_to_one_pixel() {
    let mut renderer = FilledBarRenderer::new(BarRendererConfig::default()).expect("renderer");
    let series: Vec<BarSeries> = (0..20)
        .map(|index| BarSeries::from_measures(format!("s{index}"), [("a", Some(1.0))]))
        .collect();
    let domain_axis = OrdinalAxis::new(["a"], 0.0, 10.0).expect("axis");
    let measure_axis = LinearScale::new(0.0, 1.0, 100.0, 0.0).expect("scale");

    let stats = sync(&mut renderer, &series, &domain_axis, &measure_axis);
    assert_eq!(stats.created, 20);
    assert!(
        renderer
            .elements()
            .all(|element| element.target().bounds().width == 1.0)
    );
}

#[test]
fn target_lines_draw_one_line_per_datum() {
    let config = BarRendererConfig::for_target_lines(BarGroupingType::Grouped)
        .with_target_line(TargetLineConfig::default());
    let mut renderer = TargetLineRenderer::new(config).expect("renderer");
    let series = vec![BarSeries::from_measures(
        "goal",
        [("a", Some(5.0)), ("b", Some(2.0))],
    )];
    let domain_axis = OrdinalAxis::new(["a", "b"], 0.0, 200.0).expect("axis");
    let measure_axis = LinearScale::new(0.0, 10.0, 100.0, 0.0).expect("scale");

    let prepared = renderer.preprocess(&series).expect("preprocess");
    let stats = renderer.update(&prepared, &domain_axis, &measure_axis);
    assert_eq!(stats.created, 2);

    let mut painted = frame();
    renderer.paint(&mut painted, 1.0);
    assert!(painted.stacks.is_empty());
    assert_eq!(painted.lines.len(), 2);

    let first = &painted.lines[0];
    assert_eq!(first.stroke_width_px, 3.0);
    assert!(first.round_end_caps);
    assert_abs_diff_eq!(first.points[0].x, 0.0);
    assert_abs_diff_eq!(first.points[1].x, 100.0);
    assert_abs_diff_eq!(first.points[0].y, 50.0, epsilon = 1e-9);

    let second = &painted.lines[1];
    assert_abs_diff_eq!(second.points[0].x, 100.0);
    assert_abs_diff_eq!(second.points[1].y, 80.0, epsilon = 1e-9);
}

#[test]
fn stacked_segments_share_edges_on_fractional_scales() {
    let config =
        BarRendererConfig::new(BarGroupingType::Stacked).with_stacked_bar_padding_px(0.0);
    let mut renderer = FilledBarRenderer::new(config).expect("renderer");
    let domain_axis = OrdinalAxis::new(["a"], 0.0, 100.0).expect("axis");
    let measure_axis = LinearScale::new(0.0, 30.0, 100.0, 0.0).expect("scale");
    let stacked = |value: f64| -> Vec<BarSeries> {
        (0..3)
            .map(|index| BarSeries::from_measures(format!("s{index}"), [("a", Some(value))]))
            .collect()
    };
    let by_top = |mut rects: Vec<PixelRect>| {
        rects.sort_by(|a, b| a.top.total_cmp(&b.top));
        rects
    };

    sync(&mut renderer, &stacked(10.0), &domain_axis, &measure_axis);
    renderer.paint(&mut frame(), 1.0);
    sync(&mut renderer, &stacked(5.0), &domain_axis, &measure_axis);

    let previous = by_top(
        renderer
            .elements()
            .map(|element| element.previous().bounds())
            .collect(),
    );
    let tops: Vec<f64> = previous.iter().map(|rect| rect.top).collect();
    let heights: Vec<f64> = previous.iter().map(|rect| rect.height).collect();
    assert_eq!(tops, vec![0.0, 33.0, 67.0]);
    assert_eq!(heights, vec![33.0, 34.0, 33.0]);

    let mut start = frame();
    renderer.paint(&mut start, 0.0);
    assert_eq!(start.stacks.len(), 1);
    let painted = by_top(
        start.stacks[0]
            .stack
            .segments
            .iter()
            .map(|segment| segment.bounds)
            .collect(),
    );
    assert_eq!(painted, previous);

    for progress in [0.2, 0.5, 0.7] {
        let mut mid = frame();
        renderer.paint(&mut mid, progress);
        let segments = by_top(
            mid.stacks[0]
                .stack
                .segments
                .iter()
                .map(|segment| segment.bounds)
                .collect(),
        );
        for pair in segments.windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].top, "seam at progress {progress}");
        }
    }
}

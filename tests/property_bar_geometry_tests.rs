use chart_bars::bars::{
    BarGroupSlot, BarGroupingType, BarLayoutParams, BarOrientation, BarRendererConfig,
    FilledBarRenderer, bar_group_weights, compute_domain_span,
};
use chart_bars::core::interpolate::interpolate_rect;
use chart_bars::core::{BarSeries, LinearScale, OrdinalAxis, PixelRect, Viewport};
use chart_bars::render::RenderFrame;
use proptest::prelude::*;

fn params(inner_padding_px: f64, rtl: bool) -> BarLayoutParams {
    BarLayoutParams {
        inner_padding_px,
        max_bar_width_px: None,
        orientation: BarOrientation::Vertical,
        rtl,
    }
}

proptest! {
    #[test]
    fn pattern_weights_are_normalized(
        pattern in prop::collection::vec(1u32..50, 1..16),
        extra in 0usize..4
    ) {
        let num_groups = pattern.len();
        let mut padded = pattern.clone();
        padded.extend(std::iter::repeat(7).take(extra));

        let weights = bar_group_weights(num_groups, Some(&padded)).expect("weights");
        prop_assert_eq!(weights.len(), num_groups);
        prop_assert!(weights.iter().all(|weight| *weight > 0.0));
        let total: f64 = weights.iter().sum();
        prop_assert!((total - 1.0).abs() <= 1e-9);
    }

    #[test]
    fn bars_are_never_narrower_than_one_pixel(
        domain_width_px in 0.0f64..400.0,
        count in 1usize..40,
        index_seed in 0usize..40,
        inner_padding_px in 0.0f64..6.0,
        rtl in any::<bool>()
    ) {
        let index = index_seed % count;
        let span = compute_domain_span(
            200.0,
            domain_width_px,
            BarGroupSlot::uniform(index, count),
            params(inner_padding_px, rtl),
        );
        prop_assert!(span.width >= 1.0);
        prop_assert!(span.start.is_finite());
    }

    #[test]
    fn wider_domains_never_shrink_bars(
        narrow in 0.0f64..300.0,
        extra in 0.0f64..300.0,
        count in 1usize..20,
        index_seed in 0usize..20,
        inner_padding_px in 0.0f64..6.0
    ) {
        let index = index_seed % count;
        let width_at = |domain_width_px: f64| {
            compute_domain_span(
                150.0,
                domain_width_px,
                BarGroupSlot::uniform(index, count),
                params(inner_padding_px, false),
            )
            .width
        };
        prop_assert!(width_at(narrow) <= width_at(narrow + extra));
    }

    #[test]
    fn groups_advance_left_to_right_when_they_fit(
        count in 1usize..12,
        inner_padding_px in 0u8..5,
        room in 0.0f64..200.0
    ) {
        let inner_padding_px = f64::from(inner_padding_px);
        let domain_width_px = inner_padding_px * (count as f64 - 1.0) + count as f64 + room;
        let starts: Vec<f64> = (0..count)
            .map(|index| {
                compute_domain_span(
                    500.0,
                    domain_width_px,
                    BarGroupSlot::uniform(index, count),
                    params(inner_padding_px, false),
                )
                .start
            })
            .collect();
        prop_assert!(starts.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn rtl_mirrors_uniform_groups(
        count in 1usize..12,
        domain_width_px in 10.0f64..300.0
    ) {
        for index in 0..count {
            let rtl = compute_domain_span(
                150.0,
                domain_width_px,
                BarGroupSlot::uniform(index, count),
                params(2.0, true),
            );
            let ltr = compute_domain_span(
                150.0,
                domain_width_px,
                BarGroupSlot::uniform(count - 1 - index, count),
                params(2.0, false),
            );
            prop_assert_eq!(rtl.start, ltr.start);
            prop_assert_eq!(rtl.width, ltr.width);
        }
    }

    #[test]
    fn rect_interpolation_hits_both_endpoints(
        from in (-500i16..500, -500i16..500, 0i16..300, 0i16..300),
        to in (-500i16..500, -500i16..500, 0i16..300, 0i16..300)
    ) {
        let previous = PixelRect::new(
            f64::from(from.0),
            f64::from(from.1),
            f64::from(from.2),
            f64::from(from.3),
        );
        let target = PixelRect::new(
            f64::from(to.0),
            f64::from(to.1),
            f64::from(to.2),
            f64::from(to.3),
        );
        prop_assert_eq!(interpolate_rect(previous, target, 0.0), previous);
        prop_assert_eq!(interpolate_rect(previous, target, 1.0), target);
    }

    #[test]
    fn painted_stacks_are_valid_and_deterministic(
        measures in prop::collection::vec(
            prop::collection::vec(prop::option::of(-100.0f64..100.0), 4),
            1..6
        ),
        progress in 0.0f64..=1.0
    ) {
        let categories = ["q1", "q2", "q3", "q4"];
        let series: Vec<BarSeries> = measures
            .iter()
            .enumerate()
            .map(|(index, values)| {
                BarSeries::from_measures(
                    format!("s{index}"),
                    categories.iter().copied().zip(values.iter().copied()),
                )
            })
            .collect();
        let domain_axis = OrdinalAxis::new(categories, 0.0, 400.0).expect("axis");
        let measure_axis = LinearScale::new(-600.0, 600.0, 300.0, 0.0).expect("scale");

        let mut renderer = FilledBarRenderer::new(BarRendererConfig::new(BarGroupingType::Stacked))
            .expect("renderer");
        let prepared = renderer.preprocess(&series).expect("preprocess");
        renderer.update(&prepared, &domain_axis, &measure_axis);

        let mut first = RenderFrame::new(Viewport::new(400, 300));
        renderer.paint(&mut first, progress);
        first.validate().expect("valid frame");

        let mut second = RenderFrame::new(Viewport::new(400, 300));
        renderer.paint(&mut second, progress);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.stacks.len() <= 8);
    }
}

use approx::assert_abs_diff_eq;
use rupl3d::solver::{BoxOrientation, FACES};
use rupl3d::ui::hash_id;
use rupl3d::*;
fn new_frame(ctx: &mut Context, input: &InputState) {
    ctx.new_frame(input);
    ctx.set_cursor(Vec2::splat(0.0), Vec2::new(800.0, 600.0));
}
///triangles whose first vertex has color col
fn triangles_colored(painter: &Painter, col: u32) -> usize {
    painter
        .idx
        .chunks_exact(3)
        .filter(|t| painter.vtx[t[0] as usize].col == col)
        .count()
}
fn item_color(ctx: &Context, title: &str, label: &str) -> u32 {
    let plot = ctx.plot(title).unwrap();
    plot.items.by_id(hash_id(plot.id, label)).unwrap().color
}
fn line_frame(ctx: &mut Context, ys: [f32; 3], flags: LineFlags) {
    new_frame(ctx, &InputState::default());
    ctx.begin_plot("t", Vec2::splat(200.0), PlotFlags::empty())
        .unwrap();
    ctx.plot_line("L", &[0.0, 1.0, 2.0], &ys, &[0.0, 0.0, 4.0], flags)
        .unwrap();
    ctx.end_plot().unwrap();
}
#[test]
fn empty_plot_draws_only_the_box() {
    let mut ctx = Context::new();
    let border = Color::new(0.1, 0.2, 0.3, 1.0);
    ctx.push_style_color(StyleColor::PlotBorder, border);
    new_frame(&mut ctx, &InputState::default());
    ctx.begin_plot("t", Vec2::splat(200.0), PlotFlags::empty())
        .unwrap();
    ctx.end_plot().unwrap();
    let plot = ctx.plot("t").unwrap();
    let orientation = BoxOrientation::new(plot.rotation);
    assert_eq!(orientation.visible_faces().count(), 3);
    assert_eq!(orientation.visible_edges().iter().filter(|e| **e).count(), 9);
    assert_eq!(triangles_colored(ctx.painter(), border.to_u32()), 18);
    assert_abs_diff_eq!(
        plot.plot_rect.width(),
        200.0 - 2.0 * ctx.style.plot_padding.x,
        epsilon = 1e-4
    );
    for axis in &plot.axes {
        assert_eq!(axis.ticker.len(), 11);
    }
    let texts: Vec<&str> = ctx.painter().texts.iter().map(|t| t.text.as_str()).collect();
    for label in ["t", "X", "Y", "Z"] {
        assert!(texts.contains(&label), "{label} missing from {texts:?}");
    }
    assert_eq!(plot.items.item_count(), 0);
    assert!(ctx.painter().triangle_count() > 0);
}
#[test]
fn line_fits_the_axes_and_draws_two_segments() {
    let mut ctx = Context::new();
    line_frame(&mut ctx, [0.0, 2.0, 0.0], LineFlags::NO_LEGEND);
    let plot = ctx.plot("t").unwrap();
    assert_eq!(plot.axes[0].range, Range::new(0.0, 2.0));
    assert_eq!(plot.axes[1].range, Range::new(0.0, 2.0));
    assert_eq!(plot.axes[2].range, Range::new(0.0, 4.0));
    line_frame(&mut ctx, [0.0, 2.0, 0.0], LineFlags::NO_LEGEND);
    let col = item_color(&ctx, "t", "L");
    assert_eq!(triangles_colored(ctx.painter(), col), 4);
}
#[test]
fn nan_points_drop_their_segments() {
    for flags in [LineFlags::NO_LEGEND, LineFlags::NO_LEGEND | LineFlags::SKIP_NAN] {
        let mut ctx = Context::new();
        line_frame(&mut ctx, [0.0, f32::NAN, 0.0], flags);
        line_frame(&mut ctx, [0.0, f32::NAN, 0.0], flags);
        let col = item_color(&ctx, "t", "L");
        assert_eq!(triangles_colored(ctx.painter(), col), 0);
    }
}
#[test]
fn surface_vertices_follow_the_colormap() {
    let mut ctx = Context::new();
    ctx.push_colormap_by_name("Viridis").unwrap();
    let cmap = ctx.style.colormap;
    let edge = Color::new(0.9, 0.1, 0.4, 1.0);
    for _ in 0..2 {
        new_frame(&mut ctx, &InputState::default());
        ctx.begin_plot("t", Vec2::splat(200.0), PlotFlags::empty())
            .unwrap();
        ctx.set_next_line_style(edge, None);
        ctx.plot_surface(
            "S",
            &[0.0, 1.0, 0.0, 1.0],
            &[0.0, 0.0, 1.0, 1.0],
            &[0.0, 1.0, 1.0, 2.0],
            2,
            2,
            0.0,
            0.0,
            FillFlags::NO_LEGEND,
        )
        .unwrap();
        ctx.end_plot().unwrap();
    }
    ctx.pop_colormap(1).unwrap();
    let shades: Vec<u32> = [0.0, 0.5, 1.0]
        .iter()
        .map(|t| ctx.colormaps().lerp_table(cmap, *t))
        .collect();
    let painter = ctx.painter();
    let cell = painter
        .idx
        .chunks_exact(3)
        .filter(|t| t.iter().all(|i| shades.contains(&painter.vtx[*i as usize].col)))
        .count();
    assert_eq!(cell, 2);
    for shade in shades {
        assert!(painter.vtx.iter().any(|v| v.col == shade));
    }
    // two rows and two columns of grid lines
    assert_eq!(triangles_colored(painter, edge.to_u32()), 8);
}
#[test]
fn right_double_click_on_the_facing_plane_keeps_the_view() {
    let mut ctx = Context::new();
    let run = |ctx: &mut Context, input: &InputState| {
        new_frame(ctx, input);
        ctx.begin_plot("t", Vec2::splat(200.0), PlotFlags::empty())
            .unwrap();
        ctx.setup_box_rotation_quat(Quat::IDENTITY, false, Cond::Once)
            .unwrap();
        ctx.end_plot().unwrap();
    };
    run(&mut ctx, &InputState::default());
    let center = ctx.plot("t").unwrap().plot_rect.center();
    let click = InputState {
        pointer_pos: Some(center),
        pointer_right: Some(true),
        double_click: [false, true, false],
        ..Default::default()
    };
    run(&mut ctx, &click);
    let plot = ctx.plot("t").unwrap();
    assert_abs_diff_eq!(
        plot.rotation_animation_end.dot(Quat::IDENTITY).abs(),
        1.0,
        epsilon = 1e-4
    );
    assert_abs_diff_eq!(plot.animation_time, 0.0, epsilon = 1e-3);
}
#[test]
fn right_double_click_on_a_side_plane_turns_it_to_the_viewer() {
    let x = Point3::new(1.0, 0.0, 0.0);
    let rotation = [-0.6, 0.6]
        .map(|a| Quat::from_axis_angle(a, Point3::new(0.0, 1.0, 0.0)))
        .into_iter()
        .find(|q| !BoxOrientation::new(*q).active_faces[0])
        .unwrap();
    let mut ctx = Context::new();
    let run = |ctx: &mut Context, input: &InputState| {
        new_frame(ctx, input);
        ctx.begin_plot("t", Vec2::splat(200.0), PlotFlags::empty())
            .unwrap();
        ctx.setup_box_rotation_quat(rotation, false, Cond::Once)
            .unwrap();
        ctx.end_plot().unwrap();
    };
    run(&mut ctx, &InputState::default());
    let plot = ctx.plot("t").unwrap();
    let orientation = BoxOrientation::new(plot.rotation);
    assert!(!orientation.is_2d());
    let proj = plot.projection();
    let pix = proj.corners_pix(&proj.corners());
    let face = FACES[orientation.face(0)];
    let center = face.iter().fold(Vec2::splat(0.0), |acc, c| acc + pix[*c]) / 4.0;
    assert_eq!(orientation.mouse_over_plane(&pix, center), Some(Plane::YZ));
    let click = InputState {
        pointer_pos: Some(center),
        pointer_right: Some(true),
        double_click: [false, true, false],
        ..Default::default()
    };
    run(&mut ctx, &click);
    let plot = ctx.plot("t").unwrap();
    let end = plot.rotation_animation_end;
    let facing = end * x;
    assert_abs_diff_eq!(facing.z, 1.0, epsilon = 1e-4);
    let up = end * Point3::new(0.0, 0.0, 1.0);
    assert_abs_diff_eq!(up.y, 1.0, epsilon = 1e-4);
    assert!(plot.animation_time > 0.0);
}
#[test]
fn item_colors_are_stable_across_frames() {
    let mut ctx = Context::new();
    let mut colors = Vec::new();
    for _ in 0..2 {
        new_frame(&mut ctx, &InputState::default());
        ctx.begin_plot("t", Vec2::splat(200.0), PlotFlags::empty())
            .unwrap();
        for label in ["A", "B", "A", "C"] {
            ctx.plot_line(label, &[0.0, 1.0], &[0.0, 1.0], &[0.0, 1.0], LineFlags::empty())
                .unwrap();
        }
        ctx.end_plot().unwrap();
        let plot = ctx.plot("t").unwrap();
        let legend: Vec<(&str, u32)> = (0..plot.items.legend_count())
            .map(|i| {
                (
                    plot.items.legend_label(i),
                    plot.items.legend_item(i).unwrap().color,
                )
            })
            .collect();
        colors.push(legend.iter().map(|(_, c)| *c).collect::<Vec<_>>());
        assert_eq!(
            legend.iter().map(|(l, _)| *l).collect::<Vec<_>>(),
            ["A", "B", "C"]
        );
    }
    let deep: Vec<u32> = (0..3).map(|i| ctx.colormaps().key_color(0, i)).collect();
    assert_eq!(colors[0], deep);
    assert_eq!(colors[1], deep);
}
#[test]
fn ranges_hold_once_the_first_fit_is_done() {
    let mut ctx = Context::new();
    line_frame(&mut ctx, [0.0, 2.0, 0.0], LineFlags::empty());
    new_frame(&mut ctx, &InputState::default());
    ctx.begin_plot("t", Vec2::splat(200.0), PlotFlags::empty())
        .unwrap();
    ctx.plot_line("L", &[-5.0, 5.0], &[-5.0, 5.0], &[-5.0, 5.0], LineFlags::empty())
        .unwrap();
    ctx.end_plot().unwrap();
    let plot = ctx.plot("t").unwrap();
    assert_eq!(plot.axes[0].range, Range::new(0.0, 2.0));
}
#[test]
fn auto_fit_axes_follow_the_data_every_frame() {
    let mut ctx = Context::new();
    for (lo, hi) in [(0.0, 2.0), (-5.0, 5.0)] {
        new_frame(&mut ctx, &InputState::default());
        ctx.begin_plot("t", Vec2::splat(200.0), PlotFlags::empty())
            .unwrap();
        ctx.setup_axis(Axis3D::X, None, AxisFlags::AUTO_FIT).unwrap();
        ctx.plot_line("L", &[lo, hi], &[0.0, 1.0], &[0.0, 1.0], LineFlags::empty())
            .unwrap();
        ctx.end_plot().unwrap();
        assert_eq!(ctx.plot("t").unwrap().axes[0].range, Range::new(lo, hi));
    }
}
#[test]
fn empty_data_draws_nothing() {
    let mut ctx = Context::new();
    let empty: [f32; 0] = [];
    for _ in 0..2 {
        new_frame(&mut ctx, &InputState::default());
        ctx.begin_plot("t", Vec2::splat(200.0), PlotFlags::empty())
            .unwrap();
        assert_eq!(
            ctx.plot_scatter("S", &empty, &empty, &empty, ScatterFlags::empty()),
            Ok(())
        );
        assert_eq!(ctx.plot_line("L", &empty, &empty, &empty, LineFlags::empty()), Ok(()));
        assert_eq!(ctx.plot_mesh("M", &[], &[], MeshFlags::empty()), Ok(()));
        ctx.end_plot().unwrap();
    }
    let plot = ctx.plot("t").unwrap();
    assert_eq!(plot.items.item_count(), 0);
    assert_eq!(plot.axes[0].range, Range::new(0.0, 1.0));
}
#[test]
fn bad_data_is_rejected() {
    let mut ctx = Context::new();
    new_frame(&mut ctx, &InputState::default());
    assert_eq!(
        ctx.plot_line("L", &[0.0], &[0.0], &[0.0], LineFlags::empty()),
        Err(Error::NoCurrentPlot("plot_line"))
    );
    ctx.begin_plot("t", Vec2::splat(200.0), PlotFlags::empty())
        .unwrap();
    assert_eq!(
        ctx.plot_surface("G", &[0.0], &[0.0], &[0.0], usize::MAX, 2, 0.0, 0.0, FillFlags::empty()),
        Err(Error::DataLengthMismatch {
            expected: usize::MAX,
            actual: 1
        })
    );
    assert_eq!(
        ctx.plot_line("L", &[0.0, 1.0], &[0.0], &[0.0, 1.0], LineFlags::empty()),
        Err(Error::DataLengthMismatch {
            expected: 2,
            actual: 1
        })
    );
    assert_eq!(
        ctx.plot_mesh("M", &[Point3::splat(0.0)], &[0, 0], MeshFlags::empty()),
        Err(Error::NotMultipleOf { len: 2, multiple: 3 })
    );
    ctx.end_plot().unwrap();
}

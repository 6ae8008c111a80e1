use anyhow::anyhow;
use chrono::{DateTime, Duration, Local, TimeZone};
use herdwatch_api_types::{Sample, TrendingEntry};
use itertools::Itertools;
use plotters::{
    prelude::*,
    style::{
        full_palette::{ORANGE, PURPLE_A400, TEAL},
        RGBColor,
    },
};

pub fn short_number(value: i64) -> String {
    match value {
        1000000.. => {
            format!("{:.2}mil", value as f32 / 1000000.0)
        }
        1000..=999999 => {
            format!("{:.2}K", value as f32 / 1000.0)
        }
        _ => value.to_string(),
    }
}

/// 24 hour `HH:MM` label used on the activity chart's time axis
pub fn time_label<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%H:%M").to_string()
}

fn background() -> RGBAColor {
    RGBColor(16, 10, 18).mix(0.93)
}

/// Views and cart additions over the sample window
pub fn draw_activity_chart<'a, T>(
    backend: T,
    samples: &[Sample],
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'a>>
where
    T: 'a + DrawingBackend,
{
    let points: Vec<(DateTime<Local>, u32, u32)> = samples
        .iter()
        .map(|s| (s.timestamp.with_timezone(&Local), s.views, s.carts))
        .collect();
    let (first, last) = points
        .iter()
        .map(|(date, _, _)| date)
        .minmax()
        .into_option()
        .ok_or(anyhow!("no samples"))?;
    // a lone sample still gets a readable time axis
    let (first, last) = if first == last {
        (*first - Duration::minutes(1), *last + Duration::minutes(1))
    } else {
        (*first, *last)
    };
    let max_views = points
        .iter()
        .map(|(_, views, _)| *views)
        .max()
        .ok_or(anyhow!("no samples"))?;

    let root = backend.into_drawing_area();
    root.fill(&background())?;
    let mut chart = ChartBuilder::on(&root)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .margin(10)
        .caption(
            "Real-Time Activity Stream",
            ("Jaldi, sans-serif", 20.0).into_font().color(&WHITE),
        )
        .build_cartesian_2d(first..last, 0..max_views + max_views / 10)?;

    chart
        .configure_mesh()
        .label_style(&WHITE)
        .bold_line_style(RGBColor(200, 200, 200).mix(0.2))
        .light_line_style(RGBColor(200, 200, 200).mix(0.02))
        .x_desc("Time")
        .y_desc("Events")
        .x_label_formatter(&|x| time_label(x))
        .y_label_formatter(&|y| short_number(*y as i64))
        .x_labels(6)
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|(date, views, _)| (*date, *views)),
            TEAL.stroke_width(2),
        ))?
        .label("Views")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TEAL.stroke_width(2)));
    chart
        .draw_series(LineSeries::new(
            points.iter().map(|(date, _, carts)| (*date, *carts)),
            ORANGE.stroke_width(2),
        ))?
        .label("Cart additions")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], ORANGE.stroke_width(2)));

    chart
        .configure_series_labels()
        .border_style(PURPLE_A400)
        .label_font(&WHITE)
        .draw()?;

    // To avoid the IO failure being ignored silently, we manually call the present function
    root.present()?;

    Ok(())
}

/// Current activity against baseline for each trending product, in list order
pub fn draw_trending_chart<'a, T>(
    backend: T,
    entries: &[TrendingEntry],
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'a>>
where
    T: 'a + DrawingBackend,
{
    let max_activity = entries
        .iter()
        .map(|e| e.current_activity.max(e.baseline))
        .max()
        .ok_or(anyhow!("no trending products"))?;
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

    let root = backend.into_drawing_area();
    root.fill(&background())?;
    let mut chart = ChartBuilder::on(&root)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .margin(10)
        .caption(
            "Trending Now",
            ("Jaldi, sans-serif", 20.0).into_font().color(&WHITE),
        )
        .build_cartesian_2d(
            (0..entries.len()).into_segmented(),
            0..max_activity + max_activity / 10,
        )?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .label_style(&WHITE)
        .bold_line_style(RGBColor(200, 200, 200).mix(0.2))
        .light_line_style(RGBColor(200, 200, 200).mix(0.02))
        .y_desc("Activity")
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => names.get(*i).map(|n| n.to_string()).unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|y| short_number(*y as i64))
        .draw()?;

    chart
        .draw_series(entries.iter().enumerate().map(|(i, entry)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), entry.current_activity),
                ],
                TEAL.filled(),
            );
            bar.set_margin(0, 0, 5, 5);
            bar
        }))?
        .label("Current")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], TEAL.filled()));
    chart
        .draw_series(entries.iter().enumerate().map(|(i, entry)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), entry.baseline),
                ],
                ORANGE.filled(),
            );
            bar.set_margin(0, 0, 20, 20);
            bar
        }))?
        .label("Baseline")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], ORANGE.filled()));

    chart
        .configure_series_labels()
        .border_style(PURPLE_A400)
        .label_font(&WHITE)
        .draw()?;

    root.present()?;

    Ok(())
}

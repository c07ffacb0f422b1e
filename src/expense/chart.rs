//! The bar chart of spending per category.
//!
//! The chart is an ECharts configuration built with charming. The page renders
//! an empty container for it and a script that initializes the chart once the
//! page has loaded. When there is nothing to plot, a placeholder is rendered
//! instead and no script is emitted.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::bar,
};
use maud::{Markup, PreEscaped, html};

use crate::{expense::CategoryTotal, html::HeadElement};

/// The HTML element ID of the chart container.
pub const CATEGORY_CHART_ID: &str = "category-chart";

/// The URL of the ECharts library the chart script depends on.
const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// Build the bar chart with one bar per category, in the order of `category_totals`.
pub fn category_chart(category_totals: &[CategoryTotal]) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) = category_totals
        .iter()
        .map(|category_total| (category_total.category.clone(), category_total.total))
        .unzip();

    Chart::new()
        .title(Title::new().text("Spending by Category"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Spent").data(values))
}

/// Render the chart container, or a "No data" placeholder if there are no
/// category totals.
pub fn category_chart_view(category_totals: &[CategoryTotal]) -> Markup {
    html!(
        section id="chart" class="w-full mb-4"
        {
            @if category_totals.is_empty() {
                div
                    class="flex items-center justify-center min-h-[200px] rounded
                        border border-dashed border-gray-300 dark:border-gray-600
                        text-gray-500 dark:text-gray-400"
                {
                    "No data"
                }
            } @else {
                div
                    id=(CATEGORY_CHART_ID)
                    class="min-h-[380px] rounded dark:bg-gray-100"
                {}
            }
        }
    )
}

/// The head elements that load ECharts and draw the chart.
///
/// Returns no elements when there are no category totals, since there is no
/// container to draw into.
pub fn category_chart_scripts(category_totals: &[CategoryTotal]) -> Vec<HeadElement> {
    if category_totals.is_empty() {
        return Vec::new();
    }

    let options = category_chart(category_totals).to_string();

    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{CATEGORY_CHART_ID}");
            const chart = echarts.init(chartDom);
            const option = {options};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
            }};
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }});"#
    );

    vec![
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        HeadElement::ScriptSource(PreEscaped(script)),
    ]
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

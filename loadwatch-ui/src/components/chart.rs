//! Chart Component
//!
//! Server load line chart rendered by Chart.js. The chart session is shared
//! between the page-load fetch, the selector's `change` handler and the
//! optional polling timer.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use loadwatch::chart::{
    ChartBackend, ChartData, ChartDataSource, ChartError, ChartResult, ChartSession,
    LineChartStyle, ServerId,
};
use loadwatch::ChartConfig;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlSelectElement};

use crate::api::{get_api_base, GlooChartSource};
use crate::dom;

pub const SELECT_ID: &str = "server-select";
pub const CANVAS_ID: &str = "load-chart";

#[wasm_bindgen]
extern "C" {
    /// Chart.js chart instance (global `Chart`)
    #[wasm_bindgen(js_name = Chart)]
    pub type JsChart;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(ctx: &CanvasRenderingContext2d, config: &JsValue) -> Result<JsChart, JsValue>;

    #[wasm_bindgen(method, getter)]
    fn data(this: &JsChart) -> JsValue;

    #[wasm_bindgen(method, catch)]
    fn update(this: &JsChart) -> Result<(), JsValue>;
}

fn backend_error(context: &str, err: JsValue) -> ChartError {
    ChartError::Backend(format!("{}: {:?}", context, err))
}

/// Convert through JSON so the value is a plain JS object/array
fn to_js<T: Serialize + ?Sized>(value: &T) -> ChartResult<JsValue> {
    let text = serde_json::to_string(value)?;
    js_sys::JSON::parse(&text).map_err(|e| backend_error("JSON.parse", e))
}

/// Chart.js on a canvas element
pub struct ChartJsBackend {
    canvas: HtmlCanvasElement,
}

impl ChartJsBackend {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl ChartBackend for ChartJsBackend {
    type Chart = JsChart;

    fn create(&mut self, style: &LineChartStyle, data: &ChartData) -> ChartResult<JsChart> {
        let ctx = self
            .canvas
            .get_context("2d")
            .map_err(|e| backend_error("getContext", e))?
            .ok_or_else(|| ChartError::Backend("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ChartError::Backend("not a 2d context".into()))?;

        let config = to_js(&style.chartjs_config(data))?;
        JsChart::new(&ctx, &config).map_err(|e| backend_error("new Chart", e))
    }

    fn update(&mut self, chart: &mut JsChart, data: &ChartData) -> ChartResult<()> {
        let chart_data = chart.data();
        Reflect::set(&chart_data, &"labels".into(), &to_js(&data.labels)?)
            .map_err(|e| backend_error("set labels", e))?;

        let datasets = Reflect::get(&chart_data, &"datasets".into())
            .map_err(|e| backend_error("get datasets", e))?;
        let first = Reflect::get_u32(&datasets, 0).map_err(|e| backend_error("get dataset", e))?;
        if first.is_undefined() {
            return Err(ChartError::Backend("chart has no dataset".into()));
        }
        Reflect::set(&first, &"data".into(), &to_js(&data.data)?)
            .map_err(|e| backend_error("set data", e))?;

        chart.update().map_err(|e| backend_error("update", e))
    }
}

type SharedSession = Rc<RefCell<ChartSession<ChartJsBackend>>>;

/// Wire the chart to the page. Missing elements disable the chart.
pub fn start(config: ChartConfig) {
    let Some(select) = dom::element_by_id::<HtmlSelectElement>(SELECT_ID) else {
        web_sys::console::warn_1(&format!("#{} not found, chart disabled", SELECT_ID).into());
        return;
    };
    let Some(canvas) = dom::element_by_id::<HtmlCanvasElement>(CANVAS_ID) else {
        web_sys::console::warn_1(&format!("#{} not found, chart disabled", CANVAS_ID).into());
        return;
    };

    let session: SharedSession = Rc::new(RefCell::new(ChartSession::new(
        ChartJsBackend::new(canvas),
        LineChartStyle::from_config(&config),
    )));
    let source = Rc::new(GlooChartSource::new(get_api_base(&config.api_base)));

    let refresh: Rc<dyn Fn()> = {
        let select = select.clone();
        Rc::new(move || fetch_and_apply(&select, Rc::clone(&session), Rc::clone(&source)))
    };

    refresh();

    let on_change = {
        let refresh = Rc::clone(&refresh);
        Closure::wrap(Box::new(move || refresh()) as Box<dyn FnMut()>)
    };
    if select
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .is_err()
    {
        web_sys::console::error_1(&"Failed to listen for server selection changes".into());
    }
    on_change.forget();

    if config.refresh_interval_ms > 0 {
        let millis = config.refresh_interval_ms.min(u32::MAX as u64) as u32;
        gloo_timers::callback::Interval::new(millis, move || refresh()).forget();
    }
}

/// One fetch for the currently selected server
fn fetch_and_apply(select: &HtmlSelectElement, session: SharedSession, source: Rc<GlooChartSource>) {
    let server_id = match ServerId::parse_selection(&select.value()) {
        Ok(id) => id,
        Err(e) => {
            web_sys::console::error_1(&e.to_string().into());
            return;
        }
    };

    wasm_bindgen_futures::spawn_local(async move {
        let data = match source.fetch(server_id).await {
            Ok(data) => data,
            Err(e) => {
                web_sys::console::error_1(
                    &format!("Chart data for server {} unavailable: {}", server_id, e).into(),
                );
                return;
            }
        };

        if let Err(e) = session.borrow_mut().apply(&data) {
            web_sys::console::error_1(&format!("Chart update failed: {}", e).into());
        }
    });
}

use crate::core::{display_value, Control, Folder, ParamKey, ParamSpec, ParamValue, Params, PARAM_SPECS};
use crate::dom;
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Receives every edit made through the panel.
pub type ChangeHandler = Rc<dyn Fn(ParamKey, ParamValue)>;

struct Row {
    input: Option<web::HtmlInputElement>,
    readout: web::HtmlElement,
    control: Control,
}

/// DOM control panel built from `PARAM_SPECS`, grouped by folder.
pub struct Panel {
    rows: FnvHashMap<ParamKey, Row>,
    shown: RefCell<FnvHashMap<ParamKey, String>>,
}

fn js(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

fn has_focus(input: &web::HtmlInputElement) -> bool {
    dom::window_document()
        .and_then(|d| d.active_element())
        .is_some_and(|active| {
            let active: &JsValue = active.as_ref();
            let input: &JsValue = input.as_ref();
            active == input
        })
}

impl Panel {
    /// Populate `root` with one collapsible section per folder.
    pub fn build(
        document: &web::Document,
        root: &web::HtmlElement,
        params: &Params,
        collapsed: bool,
        on_change: ChangeHandler,
    ) -> anyhow::Result<Panel> {
        let outer: web::HtmlElement = dom::create(document, "details")?;
        outer.set_class_name("panel-root");
        if !collapsed {
            outer.set_attribute("open", "").map_err(js)?;
        }
        let title: web::HtmlElement = dom::create(document, "summary")?;
        title.set_text_content(Some("Controls"));
        outer.append_child(&title).map_err(js)?;

        let mut rows = FnvHashMap::default();
        for folder in Folder::ALL {
            let section: web::HtmlElement = dom::create(document, "details")?;
            section.set_class_name("panel-folder");
            section.set_attribute("open", "").map_err(js)?;
            let summary: web::HtmlElement = dom::create(document, "summary")?;
            summary.set_text_content(Some(folder.title()));
            section.append_child(&summary).map_err(js)?;

            for spec in PARAM_SPECS.iter().filter(|s| s.folder == folder) {
                let (row_el, row) = build_row(document, spec, params, on_change.clone())?;
                section.append_child(&row_el).map_err(js)?;
                rows.insert(spec.key, row);
            }
            outer.append_child(&section).map_err(js)?;
        }
        root.append_child(&outer).map_err(js)?;
        log::info!("[panel] {} controls", rows.len());

        Ok(Panel {
            rows,
            shown: RefCell::new(FnvHashMap::default()),
        })
    }

    /// Refresh the listened controls from state written outside the panel.
    pub fn sync(&self, params: &Params) {
        let mut shown = self.shown.borrow_mut();
        for spec in PARAM_SPECS.iter().filter(|s| s.listen) {
            let Some(row) = self.rows.get(&spec.key) else {
                continue;
            };
            let value = params.get(spec.key);
            let text = display_value(&value, &row.control);
            if shown.get(&spec.key) == Some(&text) {
                continue;
            }
            row.readout.set_text_content(Some(&text));
            if let (Some(input), ParamValue::Number(v)) = (row.input.as_ref(), &value) {
                if !has_focus(input) {
                    input.set_value(&v.to_string());
                }
            }
            shown.insert(spec.key, text);
        }
    }
}

fn build_row(
    document: &web::Document,
    spec: &'static ParamSpec,
    params: &Params,
    on_change: ChangeHandler,
) -> anyhow::Result<(web::HtmlElement, Row)> {
    let row: web::HtmlElement = dom::create(document, "div")?;
    row.set_class_name("panel-row");
    let label: web::HtmlElement = dom::create(document, "span")?;
    label.set_class_name("panel-label");
    label.set_text_content(Some(spec.label));
    row.append_child(&label).map_err(js)?;

    let value = params.get(spec.key);
    let readout: web::HtmlElement = dom::create(document, "span")?;
    readout.set_class_name("panel-value");
    readout.set_text_content(Some(&display_value(&value, &spec.control)));

    let input = match spec.control {
        Control::Readonly => None,
        control => {
            let input: web::HtmlInputElement = dom::create(document, "input")?;
            match (control, &value) {
                (Control::Slider { min, max, step }, ParamValue::Number(v)) => {
                    input.set_type("range");
                    input.set_min(&min.to_string());
                    input.set_max(&max.to_string());
                    input.set_step(&step.to_string());
                    input.set_value(&v.to_string());
                }
                (Control::Color, ParamValue::Color(c)) => {
                    input.set_type("color");
                    input.set_value(&c.to_hex());
                }
                (Control::Toggle, ParamValue::Flag(on)) => {
                    input.set_type("checkbox");
                    input.set_checked(*on);
                }
                _ => {}
            }
            wire_input(&input, spec, readout.clone(), on_change);
            row.append_child(&input).map_err(js)?;
            Some(input)
        }
    };
    row.append_child(&readout).map_err(js)?;

    Ok((
        row,
        Row {
            input,
            readout,
            control: spec.control,
        },
    ))
}

fn wire_input(
    input: &web::HtmlInputElement,
    spec: &'static ParamSpec,
    readout: web::HtmlElement,
    on_change: ChangeHandler,
) {
    let event = match spec.control {
        Control::Toggle => "change",
        _ => "input",
    };
    let el = input.clone();
    dom::add_listener(input, event, move |_| {
        let raw = match spec.control {
            Control::Toggle => el.checked().to_string(),
            _ => el.value(),
        };
        match spec.control.parse_input(spec.key, &raw) {
            Ok(value) => {
                readout.set_text_content(Some(&display_value(&value, &spec.control)));
                on_change(spec.key, value);
            }
            Err(e) => log::warn!("[panel] {}", e),
        }
    });
}

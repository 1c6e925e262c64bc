use crate::model::{MarkerId, MarkerLocation};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MarkerPinProps {
    pub marker: &'static MarkerLocation,
    pub active: bool,
    /// Pins pop in once the map has faded in.
    pub loaded: bool,
    pub on_select: Callback<MarkerId>,
}

#[function_component(MarkerPin)]
pub fn marker_pin(props: &MarkerPinProps) -> Html {
    let m = props.marker;
    let onclick = {
        let cb = props.on_select.clone();
        let id = m.id;
        Callback::from(move |_| cb.emit(id))
    };
    let size = if props.active { 30 } else { 22 };
    let (fill, shadow, z) = if props.active {
        ("#5d342f", "0 0 0 5px rgba(93,52,47,0.3)", 3)
    } else {
        ("#a05c4a", "0 2px 10px rgba(0,0,0,0.2)", 2)
    };
    let pop = if props.loaded { 1 } else { 0 };
    let style = format!(
        "position:absolute; left:{}%; top:{}%; width:{size}px; height:{size}px; border-radius:50%; \
         background:{fill}; border:2px solid #fff; box-shadow:{shadow}; z-index:{z}; \
         transform:translate(-50%, -50%) scale({pop}); transition:all 0.3s ease; cursor:pointer; \
         display:flex; justify-content:center; align-items:center;",
        m.x_percent, m.y_percent
    );
    html! {
        <div class="origin-marker" title={m.name} {style} {onclick}>
            <span style="color:white; font-weight:bold; font-size:10px; pointer-events:none;">{ m.initial().to_string() }</span>
        </div>
    }
}

use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    pub loaded: bool,
    pub origin_count: usize,
}

#[function_component]
pub fn LegendPanel(props: &LegendPanelProps) -> Html {
    let style = format!(
        "position:absolute; bottom:2rem; left:2rem; padding:1rem 1.5rem; background:white; border-radius:8px; \
         box-shadow:0 10px 30px rgba(0,0,0,0.1); z-index:10; max-width:280px; \
         transition:opacity 0.8s ease, transform 0.8s ease; opacity:{}; transform:{};",
        if props.loaded { 1 } else { 0 },
        if props.loaded { "translateY(0)" } else { "translateY(20px)" }
    );
    html! {<div {style}>
        <p style="font-family:'Playfair Display', serif; font-size:1rem; color:#5d342f; margin-bottom:1rem; font-style:italic;">
            {"Drag to explore coffee regions. Zoom with scroll wheel."}
        </p>
        <p style="color:#666; font-size:0.9rem;">
            { format!("Our beans come from {} growing regions across the globe. Click on markers to learn about each origin.", props.origin_count) }
        </p>
    </div>}
}

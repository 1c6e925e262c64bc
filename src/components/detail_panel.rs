use crate::model::MarkerLocation;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DetailPanelProps {
    pub marker: Option<&'static MarkerLocation>,
    pub on_close: Callback<()>,
    pub on_view_beans: Callback<&'static MarkerLocation>,
}

#[function_component(DetailPanel)]
pub fn detail_panel(props: &DetailPanelProps) -> Html {
    let open = props.marker.is_some();
    let panel_style = format!(
        "position:absolute; top:50%; right:2rem; width:350px; background:white; border-radius:8px; \
         box-shadow:0 10px 30px rgba(0,0,0,0.1); overflow:hidden; z-index:10; transition:transform 0.5s ease; \
         transform:{}; opacity:{};",
        if open { "translateY(-50%)" } else { "translateY(-50%) translateX(100%)" },
        if open { 1 } else { 0 }
    );
    let Some(m) = props.marker else {
        return html! { <div class="origin-detail" style={panel_style}></div> };
    };

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let beans_cb = {
        let cb = props.on_view_beans.clone();
        Callback::from(move |_| cb.emit(m))
    };
    let row_style = "display:flex; align-items:flex-start; margin-bottom:5px; font-size:0.9rem;";
    let label_style = "flex-basis:80px; color:#777;";
    let value_style = "flex:1; color:#333;";
    let button_style = "flex:1; padding:12px 24px; font-size:0.9rem; text-transform:uppercase; \
        letter-spacing:1px; border-radius:4px; cursor:pointer;";

    html! {
        <div class="origin-detail" style={panel_style}>
            <img src={m.image} alt={m.name} style="width:100%; height:200px; object-fit:cover;" />
            <div style="padding:20px;">
                <h3 style="font-size:1.8rem; font-family:'Playfair Display', serif; color:#5d342f; margin-bottom:0.5rem;">{ m.name }</h3>
                <p style="color:#666; line-height:1.6; margin-bottom:1rem;">{ m.description }</p>
                <div style="background:#fff8f4; border-radius:8px; padding:15px; margin-bottom:15px;">
                    <div style="font-size:0.8rem; color:#5d342f; letter-spacing:1px; font-weight:bold; margin-bottom:6px;">{"FLAVOR"}</div>
                    <ul style="margin-left:18px; color:#3a3a3a; line-height:1.6;">
                        { for m.flavors.iter().map(|f| html! { <li>{ *f }</li> }) }
                    </ul>
                </div>
                <h4 style="font-size:1.1rem; margin-bottom:10px; color:#5d342f;">{"Info"}</h4>
                <div style={row_style}><span style={label_style}>{"Altitude"}</span><span style={value_style}>{ m.altitude }</span></div>
                <div style={row_style}><span style={label_style}>{"Varietal"}</span><span style={value_style}>{ m.varieties.join(", ") }</span></div>
                <div style={row_style}><span style={label_style}>{"Process"}</span><span style={value_style}>{ m.process }</span></div>
                <div style="display:flex; gap:10px; margin-top:20px;">
                    <button style={format!("{button_style} background:#a05c4a; color:white; border:none;")} onclick={beans_cb}>{"View Beans"}</button>
                    <button style={format!("{button_style} background:transparent; color:#a05c4a; border:1px solid #a05c4a;")} onclick={close_cb}>{"Close"}</button>
                </div>
            </div>
        </div>
    }
}

use yew::prelude::*;

/// Buttons in the zoom rail, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MapControl {
    ZoomIn,
    ZoomOut,
    Reset,
}

impl MapControl {
    const RAIL: [MapControl; 3] = [MapControl::ZoomIn, MapControl::ZoomOut, MapControl::Reset];

    fn glyph(self) -> &'static str {
        match self {
            MapControl::ZoomIn => "+",
            MapControl::ZoomOut => "\u{2212}",
            MapControl::Reset => "\u{25CE}",
        }
    }

    fn label(self) -> &'static str {
        match self {
            MapControl::ZoomIn => "Zoom in on the map",
            MapControl::ZoomOut => "Zoom out of the map",
            MapControl::Reset => "Back to the world view",
        }
    }

    /// Reset sits apart from the zoom pair.
    fn style(self) -> &'static str {
        match self {
            MapControl::Reset => {
                "width:40px; height:40px; margin-top:6px; border:none; border-top:1px solid #eadfd6; \
                 background:#faf6f2; color:#a05c4a; font-size:1.1rem; cursor:pointer;"
            }
            _ => {
                "width:40px; height:40px; border:none; background:white; color:#5d342f; \
                 font-size:1.4rem; line-height:1; cursor:pointer;"
            }
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct MapControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_recenter: Callback<()>,
}

#[function_component(MapControls)]
pub fn map_controls(props: &MapControlsProps) -> Html {
    let button = |control: MapControl| {
        let cb = match control {
            MapControl::ZoomIn => props.on_zoom_in.clone(),
            MapControl::ZoomOut => props.on_zoom_out.clone(),
            MapControl::Reset => props.on_recenter.clone(),
        };
        let onclick = Callback::from(move |_: MouseEvent| cb.emit(()));
        html! {
            <button key={control.label()} onclick={onclick} title={control.label()} aria-label={control.label()} style={control.style()}>
                { control.glyph() }
            </button>
        }
    };
    html! {<nav aria-label="Map view" style="position:absolute; right:2rem; top:50%; transform:translateY(-50%); z-index:10; display:flex; flex-direction:column; \
                 background:white; border:1px solid #eadfd6; border-radius:20px; overflow:hidden; box-shadow:0 6px 20px rgba(93,52,47,0.15);">
        { for MapControl::RAIL.into_iter().map(button) }
    </nav>}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rail_reads_zoom_in_then_out_then_reset() {
        assert_eq!(
            MapControl::RAIL,
            [MapControl::ZoomIn, MapControl::ZoomOut, MapControl::Reset]
        );
        let labels: Vec<_> = MapControl::RAIL.iter().map(|c| c.label()).collect();
        assert!(labels.iter().all(|l| !l.is_empty()));
        assert!(labels[0] != labels[1] && labels[1] != labels[2]);
        assert_ne!(MapControl::Reset.style(), MapControl::ZoomIn.style());
    }
}

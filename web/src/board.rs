use crate::canvas::{CanvasRenderer, canvas_size};
use crate::sound::{LOSS_SOUND, LossSound};
use crate::utils::js_random_seed;
use bitflags::bitflags;
use sapper_core::{BoardConfig, Match, Outcome, PixelPos};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub(crate) struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

/// What a mouse press on the board asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ClickAction {
    Reveal,
    Flag,
}

impl ClickAction {
    /// Left button reveals, right button flags. Chords of both are ignored.
    pub(crate) fn from_buttons(buttons: MouseButtons) -> Option<Self> {
        let pressed = buttons & (MouseButtons::LEFT | MouseButtons::RIGHT);
        if pressed == MouseButtons::LEFT {
            Some(Self::Reveal)
        } else if pressed == MouseButtons::RIGHT {
            Some(Self::Flag)
        } else {
            None
        }
    }
}

pub(crate) enum Msg {
    Click(PixelPos, MouseButtons),
    NewGame,
}

#[derive(Properties, Clone, Debug, PartialEq)]
pub(crate) struct BoardProps {
    pub config: BoardConfig,
    /// Seed of the first match, random when missing.
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct BoardView {
    game: Match<LossSound>,
    canvas: NodeRef,
}

impl BoardView {
    fn new_match(config: BoardConfig, seed: u64) -> Match<LossSound> {
        log::debug!("seed: {:#x}", seed);
        let (width, height) = canvas_size(&config);
        let center = (width as i32 / 2, height as i32 / 2);
        Match::new(config, center, seed, LossSound::new(LOSS_SOUND))
    }

    fn click(&mut self, pos: PixelPos, buttons: MouseButtons) -> bool {
        if !self.game.contains(pos) {
            log::trace!("click outside of the board at {:?}", pos);
            return false;
        }

        match ClickAction::from_buttons(buttons) {
            Some(ClickAction::Reveal) => self.game.on_reveal(pos).has_update(),
            Some(ClickAction::Flag) => self.game.on_flag(pos).has_update(),
            None => false,
        }
    }

    fn draw(&self) {
        let Some(canvas) = self.canvas.cast::<HtmlCanvasElement>() else {
            log::warn!("board canvas is not mounted");
            return;
        };

        match CanvasRenderer::from_canvas(&canvas) {
            Ok(mut renderer) => self.game.render(&mut renderer),
            Err(err) => log::error!("Could not get canvas context: {:?}", err),
        }
    }

    fn outcome_class(&self) -> &'static str {
        match self.game.outcome() {
            Outcome::Playing => "in-progress",
            Outcome::Won => "win",
            Outcome::Lost => "lose",
        }
    }
}

impl Component for BoardView {
    type Message = Msg;
    type Properties = BoardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let BoardProps { config, seed } = *ctx.props();
        let seed = seed.unwrap_or_else(js_random_seed);
        Self {
            game: Self::new_match(config, seed),
            canvas: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Click(pos, buttons) => {
                log::trace!("click at {:?} ({:?})", pos, buttons);
                self.click(pos, buttons)
            }
            Msg::NewGame => {
                self.game = Self::new_match(ctx.props().config, js_random_seed());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (width, height) = canvas_size(&ctx.props().config);
        let mines_left = self.game.mines_left().to_string();
        let outcome_class = classes!(self.outcome_class());

        let onmousedown = ctx.link().callback(|e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            Msg::Click((e.offset_x(), e.offset_y()), buttons)
        });
        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::NewGame
        });

        html! {
            <div class="sapper" oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                <nav>
                    <aside>{mines_left}</aside>
                    <span><button class={outcome_class} onclick={cb_new_game}/></span>
                </nav>
                <canvas
                    ref={self.canvas.clone()}
                    width={width.to_string()}
                    height={height.to_string()}
                    {onmousedown}
                />
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        self.draw();
    }
}

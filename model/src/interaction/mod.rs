mod interaction;
pub use interaction::{
    Interaction, InteractionType, MessageComponentInteraction, MessageComponentInteractionData,
    UnsupportedInteraction,
};

mod interaction_response;
pub use interaction_response::{InteractionResponse, InteractionResponseType, EPHEMERAL_FLAG};

mod interaction_callback_data;
pub use interaction_callback_data::InteractionCallbackData;

mod component;
pub use component::{
    ActionRow, Button, ButtonStyle, Component, ComponentType, PartialEmoji, MAX_BUTTONS_PER_ROW,
};

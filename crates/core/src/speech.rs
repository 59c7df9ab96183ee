//! What the skill says.

/// Ticking clock played while waiting for button presses.
pub const WAITING_AUDIO: &str =
    "<audio src='https://s3.amazonaws.com/ask-soundlibrary/foley/amzn_sfx_rhythmic_ticking_30s_01.mp3'/>";

pub const WELCOME: &str = "Welcome to the Color Changer skill. \
    This skill shows the basics every Echo Button skill needs: \
    roll call, starting and stopping the input handler, button events and input handler timeouts. \
    Let's start with roll call, which wakes up the buttons and makes sure they are ready for play. \
    Press the first button and wait for confirmation before pressing the second button.";

pub const ROLL_CALL_RETRY: &str =
    "Ok. Press the first button, wait for confirmation, then press the second button.";

pub const FIRST_BUTTON_CHECKED_IN: &str = "hello, button 1";

pub const BOTH_BUTTONS_CHECKED_IN: &str = "hello buttons 1 and 2 <break time='1s'/> Awesome! ";

pub const SECOND_BUTTON_CHECKED_IN: &str =
    "hello, button 2 <break time='1s'/> Awesome. I've registered two buttons. ";

pub const PICK_A_COLOR: &str =
    "Now let's learn about button events. Please select one of the following colors: red, blue, or green.";

pub const PICK_A_COLOR_REPROMPT: &str = "Please pick a color: green, red, or blue";

pub const ROLL_CALL_TIMEOUT: &str =
    "For this skill we need two buttons. Would you like more time to press the buttons?";

pub const ROLL_CALL_TIMEOUT_REPROMPT: &str =
    "Say yes to go back and add buttons, or no to exit now.";

pub const PLAY_TIMEOUT: &str =
    "The input handler has timed out. That concludes our test, would you like to quit?";

pub const PLAY_TIMEOUT_REPROMPT: &str =
    "Would you like to exit? Say Yes to exit, or No to keep going";

pub const UNREGISTERED_BUTTON: &str =
    "Unregistered button. Only buttons registered during roll call are in play. ";

pub const KEEP_GOING_REPROMPT: &str = "Pick a different color, red, blue, or green.";

pub const PLAY_HELP_REPROMPT: &str =
    "Pick a color to test your buttons: red, blue, or green. Or say cancel or exit to quit. ";

pub const PLAY_HELP: &str = "Now that you have registered two buttons, \
    you can pick a color to show when the buttons are pressed. \
    Select one of the following colors: red, blue, or green. \
    If you do not wish to continue, you can say exit. ";

pub const ROLL_CALL_HELP_REPROMPT: &str = "You can say yes to continue, or no or exit to quit.";

pub const ROLL_CALL_HELP: &str = "You will need two Echo buttons to use this skill. \
    Each of the two buttons you plan to use must be pressed for the skill to register them. \
    Would you like to continue and register two Echo buttons? ";

pub const FALLBACK_REPROMPT: &str = "Please say again, or say help if you're not sure what to do.";

pub const GOODBYE: &str = "Good Bye!";

pub const APOLOGY: &str = "Sorry, something went wrong on my end. Please try again.";

pub fn waiting(text: &str) -> String {
    format!("{text}{WAITING_AUDIO}")
}

pub fn color_confirmed(color: &str) -> String {
    waiting(&format!(
        "Ok. {color} it is. When you press a button, it will now turn {color}. \
         Pressing the button will also interrupt me if I'm speaking or playing music. \
         I'll keep talking so you can interrupt me. Go ahead and try it. "
    ))
}

/// `number` is 1-based, the way the user counts buttons.
pub fn button_pressed(number: usize) -> String {
    waiting(&format!("button {number}. "))
}

pub fn keep_going() -> String {
    format!("Ok, let's keep going. {KEEP_GOING_REPROMPT}")
}

pub fn fallback() -> String {
    format!("Sorry, I didn't get that. {FALLBACK_REPROMPT}")
}

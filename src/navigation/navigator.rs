use tracing::debug;

use crate::navigation::route::Screen;

/// Navigation intents raised by the screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    GetStarted,
    SignInSuccess,
    SignUpSuccess,
    GoToSignUp,
    GoToSignIn,
    OpenProduct(String),
    OpenCart,
    BuyNow,
    Checkout,
    Back,
}

/// Back stack driven by [`NavEvent`]s, starting at the welcome screen.
#[derive(Debug, Clone)]
pub struct Navigator {
    back_stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::starting_at(Screen::Welcome)
    }

    pub fn starting_at(start: Screen) -> Self {
        Self {
            back_stack: vec![start],
        }
    }

    pub fn current(&self) -> &Screen {
        // The stack is never emptied: `pop_back_stack` keeps the root.
        &self.back_stack[self.back_stack.len() - 1]
    }

    pub fn back_stack(&self) -> &[Screen] {
        &self.back_stack
    }

    /// Apply `event` to the current screen. Returns the new current screen,
    /// or `None` when the event means nothing where we are.
    pub fn handle(&mut self, event: NavEvent) -> Option<&Screen> {
        let current = self.current().clone();
        debug!("Navigation event {:?} on {}", event, current);

        match (&current, event) {
            (Screen::Welcome, NavEvent::GetStarted) => {
                self.navigate_pop_up_to(Screen::SignIn, &Screen::Welcome)
            }
            (Screen::SignIn, NavEvent::SignInSuccess) => {
                self.navigate_pop_up_to(Screen::Home, &Screen::SignIn)
            }
            (Screen::SignIn, NavEvent::GoToSignUp) => self.navigate(Screen::SignUp),
            (Screen::SignUp, NavEvent::SignUpSuccess) => {
                self.navigate_pop_up_to(Screen::Home, &Screen::SignUp)
            }
            (Screen::SignUp, NavEvent::GoToSignIn) => {
                self.navigate_pop_up_to(Screen::SignIn, &Screen::SignUp)
            }
            (Screen::Home, NavEvent::OpenProduct(product_id)) => {
                let screen = Screen::product_detail(product_id).ok()?;
                self.navigate(screen)
            }
            (Screen::Home, NavEvent::OpenCart) => self.navigate(Screen::Cart),
            (Screen::ProductDetail { .. }, NavEvent::BuyNow) => self.navigate(Screen::Cart),
            (Screen::Cart, NavEvent::Checkout) => self.navigate(Screen::Checkout),
            (_, NavEvent::Back) => {
                if !self.pop_back_stack() {
                    return None;
                }
            }
            (_, event) => {
                debug!("Ignoring {:?} on {}", event, current);
                return None;
            }
        }

        Some(self.current())
    }

    /// Pop the top screen. The root screen is never popped.
    pub fn pop_back_stack(&mut self) -> bool {
        if self.back_stack.len() <= 1 {
            return false;
        }
        self.back_stack.pop();
        true
    }

    fn navigate(&mut self, screen: Screen) {
        self.back_stack.push(screen);
    }

    /// Pop everything above `pop_up_to` and the entry itself, then push `screen`.
    fn navigate_pop_up_to(&mut self, screen: Screen, pop_up_to: &Screen) {
        if let Some(position) = self.back_stack.iter().rposition(|s| s == pop_up_to) {
            self.back_stack.truncate(position);
        }
        self.back_stack.push(screen);
    }
}

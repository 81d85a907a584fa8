use rehook_core::prelude::*;
use rehook_devtools::Inspector;

struct Counter {
    count: i32,
    word: String,
    set_count: Setter<i32>,
    set_word: Setter<String>,
}

impl Instance for Counter {
    fn render(&self) {
        println!("Count is: {}, Word is: {}", self.count, self.word);
    }
}

impl Counter {
    fn increment(&self) -> Result<(), HookError> {
        self.set_count.set(self.count + 1)
    }

    fn set_word(&self, word: &str) -> Result<(), HookError> {
        self.set_word.set(word.to_string())
    }
}

fn app() -> Result<Counter, HookError> {
    let (count, set_count) = use_state(0)?;
    let (word, set_word) = use_state(String::new())?;

    use_effect(|| println!("hookssss!!!!"), deps![count, word.clone()])?;
    use_effect(|| println!("hooks2!!!!!"), deps![])?;

    Ok(Counter {
        count,
        word,
        set_count,
        set_word,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut inspector = Inspector::new();
    let handle = render(app)?;
    log::info!("{}", inspector.frame(&handle));

    for _ in 0..3 {
        handle.instance().increment()?;
        log::info!("{}", inspector.frame(&handle));
    }
    for word in ["yooo", "ssup"] {
        handle.instance().set_word(word)?;
        log::info!("{}", inspector.frame(&handle));
    }

    for line in inspector.history() {
        println!("{line}");
    }
    Ok(())
}

use crate::{
    cartridge::{CartType, Cartridge, StateError},
    settings::Settings,
    system::System,
};

fn rom(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i * 3 % 256) as u8 ^ (i >> 12) as u8).collect()
}

fn boot(cart_type: CartType, image: &[u8], settings: &Settings) -> System {
    let cartridge = Cartridge::new(cart_type, image, "synthetic", settings).unwrap();
    let mut system = System::new();
    system.attach(cartridge);
    system.reset();
    system
}

fn save(system: &System) -> Vec<u8> {
    let mut state = Vec::new();
    system.cartridge().unwrap().save(&mut state).unwrap();
    state
}

fn load(system: &mut System, state: &[u8]) -> Result<(), StateError> {
    let (cartridge, pages) = system.cartridge_mut().unwrap();
    cartridge.load(pages, &mut &state[..])
}

fn window(system: &mut System) -> Vec<u8> {
    (0x1000..0x2000).map(|address| system.inspect(address)).collect()
}

#[test]
fn test_restored_system_reads_the_same() {
    let image = rom(0x3000);
    let mut system = boot(CartType::FA, &image, &Settings::default());
    for offset in 0..0x100 {
        system.poke(0x1000 + offset, !(offset as u8));
    }
    system.peek(0x1FF9);
    let state = save(&system);

    let mut restored = boot(CartType::FA, &image, &Settings::default());
    assert_eq!(2, restored.cartridge().unwrap().current_bank());
    load(&mut restored, &state).unwrap();

    assert_eq!(1, restored.cartridge().unwrap().current_bank());
    assert_eq!(window(&mut system), window(&mut restored));
    assert_eq!(state, save(&restored));
}

#[test]
fn test_state_keeps_start_bank() {
    let image = rom(0x8000);
    let settings = Settings {
        start_bank: Some(6),
        ..Default::default()
    };
    let system = boot(CartType::F4, &image, &settings);
    let state = save(&system);

    let mut restored = boot(CartType::F4, &image, &Settings::default());
    load(&mut restored, &state).unwrap();
    assert_eq!(6, restored.cartridge().unwrap().start_bank());
    assert_eq!(6, restored.cartridge().unwrap().current_bank());
}

#[test]
fn test_rejected_state_leaves_system_running() {
    let image = rom(0x2000);
    let e0 = boot(CartType::E0, &image, &Settings::default());
    let state = save(&e0);

    let mut system = boot(CartType::F8SC, &image, &Settings::default());
    system.poke(0x1000, 0x99);
    let before = window(&mut system);

    let error = load(&mut system, &state).unwrap_err();
    assert!(
        error
            .to_string()
            .starts_with("Save state incompatible or corrupted")
    );
    assert_eq!(before, window(&mut system));
    assert_eq!(0x99, system.peek(0x1080));
}

#[test]
fn test_truncated_state_is_rejected() {
    let image = rom(0x2000);
    let mut system = boot(CartType::F8SC, &image, &Settings::default());
    let state = save(&system);

    assert!(matches!(
        load(&mut system, &state[..state.len() - 1]),
        Err(StateError::Decode(_))
    ));
}

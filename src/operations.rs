//! Handlers for each instruction.
//!
//! Every handler receives a state whose pc already points past the instruction being run and
//! returns the next state. Skips add 2 more to the pc; jumps, calls and returns replace it.

use rand::RngCore;

use crate::constants::GLYPH_SIZE;
use crate::error::Result;
use crate::keypad::Keypad;
use crate::state::State;

const FLAG: usize = 0xF;

fn skip_if(state: &State, condition: bool) -> State {
    let pc = if condition {
        state.pc.wrapping_add(0x2)
    } else {
        state.pc
    };
    State { pc, ..*state }
}

/// clear
pub fn clr(state: &State) -> State {
    let mut display = state.display;
    display.clear();
    State { display, ..*state }
}

/// PC = STACK.pop()
pub fn rts(state: &State) -> Result<State> {
    let mut next = *state;
    next.pc = next.pop()?;
    Ok(next)
}

/// PC = addr
pub fn jump(state: &State, addr: u16) -> State {
    State { pc: addr, ..*state }
}

/// STACK.push(PC); PC = addr
pub fn call(state: &State, addr: u16) -> Result<State> {
    let mut next = *state;
    next.push(state.pc)?;
    next.pc = addr;
    Ok(next)
}

/// if Vx == kk then pc += 2
pub fn ske(state: &State, x: u8, kk: u8) -> State {
    skip_if(state, state.v[x as usize] == kk)
}

/// if Vx != kk then pc += 2
pub fn skne(state: &State, x: u8, kk: u8) -> State {
    skip_if(state, state.v[x as usize] != kk)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &State, x: u8, y: u8) -> State {
    skip_if(state, state.v[x as usize] == state.v[y as usize])
}

/// Vx = kk
pub fn load(state: &State, x: u8, kk: u8) -> State {
    let mut v = state.v;
    v[x as usize] = kk;
    State { v, ..*state }
}

/// Vx += kk
/// Overflow is dropped and VF is left alone
pub fn add(state: &State, x: u8, kk: u8) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(kk);
    State { v, ..*state }
}

/// Vx = Vy
pub fn mv(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State { v, ..*state }
}

/// Vx |= Vy
pub fn or(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] |= v[y as usize];
    State { v, ..*state }
}

/// Vx &= Vy
pub fn and(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] &= v[y as usize];
    State { v, ..*state }
}

/// Vx ^= Vy
pub fn xor(state: &State, x: u8, y: u8) -> State {
    let mut v = state.v;
    v[x as usize] ^= v[y as usize];
    State { v, ..*state }
}

// The arithmetic handlers write VF last so that it holds the flag even when x is F.

/// Vx += Vy; VF = carry
pub fn addr(state: &State, x: u8, y: u8) -> State {
    let (res, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = res;
    v[FLAG] = u8::from(carry);
    State { v, ..*state }
}

/// Vx -= Vy; VF = Vx >= Vy
pub fn sub(state: &State, x: u8, y: u8) -> State {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = vx.wrapping_sub(vy);
    v[FLAG] = u8::from(vx >= vy);
    State { v, ..*state }
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(state: &State, x: u8) -> State {
    let vx = state.v[x as usize];
    let mut v = state.v;
    v[x as usize] = vx >> 1;
    v[FLAG] = vx & 0x1;
    State { v, ..*state }
}

/// Vx = Vy - Vx; VF = Vy >= Vx
pub fn subn(state: &State, x: u8, y: u8) -> State {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    let mut v = state.v;
    v[x as usize] = vy.wrapping_sub(vx);
    v[FLAG] = u8::from(vy >= vx);
    State { v, ..*state }
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(state: &State, x: u8) -> State {
    let vx = state.v[x as usize];
    let mut v = state.v;
    v[x as usize] = vx << 1;
    v[FLAG] = vx >> 7;
    State { v, ..*state }
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &State, x: u8, y: u8) -> State {
    skip_if(state, state.v[x as usize] != state.v[y as usize])
}

/// I = addr
pub fn loadi(state: &State, addr: u16) -> State {
    State { i: addr, ..*state }
}

/// PC = V0 + addr
pub fn jumpi(state: &State, addr: u16) -> State {
    State {
        pc: addr + u16::from(state.v[0x0]),
        ..*state
    }
}

/// Vx = rand_byte & kk
pub fn rand(state: &State, x: u8, kk: u8, rng: &mut dyn RngCore) -> State {
    let rand_byte = rng.next_u32() as u8;
    let mut v = state.v;
    v[x as usize] = rand_byte & kk;
    State { v, ..*state }
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory I..I+n at position Vx, Vy on the display with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(state: &State, x: u8, y: u8, n: u8) -> State {
    let mut sprite = [0; 15];
    for (row, byte) in sprite.iter_mut().enumerate().take(n as usize) {
        *byte = state.memory.read(state.i.wrapping_add(row as u16));
    }

    let mut display = state.display;
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    let collision = display.draw_sprite(vx, vy, &sprite[..n as usize]);

    let mut v = state.v;
    v[FLAG] = u8::from(collision);
    State {
        v,
        display,
        ..*state
    }
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &State, x: u8, keypad: &Keypad) -> State {
    skip_if(state, keypad.is_down(state.v[x as usize]))
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &State, x: u8, keypad: &Keypad) -> State {
    skip_if(state, !keypad.is_down(state.v[x as usize]))
}

/// Vx = DT
pub fn moved(state: &State, x: u8) -> State {
    let mut v = state.v;
    v[x as usize] = state.timers.delay;
    State { v, ..*state }
}

/// await keypress for Vx
/// Without a key down the pc is moved back onto this instruction so it runs again next cycle
pub fn keyd(state: &State, x: u8, keypad: &Keypad) -> State {
    match keypad.first_down() {
        Some(key) => {
            let mut v = state.v;
            v[x as usize] = key;
            State { v, ..*state }
        }
        None => State {
            pc: state.pc.wrapping_sub(0x2),
            ..*state
        },
    }
}

/// DT = Vx
pub fn loads(state: &State, x: u8) -> State {
    let mut timers = state.timers;
    timers.delay = state.v[x as usize];
    State { timers, ..*state }
}

/// ST = Vx
pub fn ld(state: &State, x: u8) -> State {
    let mut timers = state.timers;
    timers.sound = state.v[x as usize];
    State { timers, ..*state }
}

/// I += Vx; VF = I + Vx > 0xFFF
pub fn addi(state: &State, x: u8) -> State {
    let i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    let mut v = state.v;
    v[FLAG] = u8::from(u32::from(state.i) + u32::from(state.v[x as usize]) > 0xFFF);
    State { i, v, ..*state }
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &State, x: u8) -> State {
    State {
        i: u16::from(state.v[x as usize]) * GLYPH_SIZE,
        ..*state
    }
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address I
pub fn bcd(state: &State, x: u8) -> State {
    let vx = state.v[x as usize];
    let mut memory = state.memory;
    memory.write(state.i, vx / 100);
    memory.write(state.i.wrapping_add(1), vx / 10 % 10);
    memory.write(state.i.wrapping_add(2), vx % 10);
    State { memory, ..*state }
}

/// mem[I..=I+x] = V0..=Vx
/// I is left unchanged
pub fn stor(state: &State, x: u8) -> State {
    let mut memory = state.memory;
    for (offset, value) in state.v.iter().enumerate().take(x as usize + 1) {
        memory.write(state.i.wrapping_add(offset as u16), *value);
    }
    State { memory, ..*state }
}

/// V0..=Vx = mem[I..=I+x]
/// I is left unchanged
pub fn read(state: &State, x: u8) -> State {
    let mut v = state.v;
    for (offset, value) in v.iter_mut().enumerate().take(x as usize + 1) {
        *value = state.memory.read(state.i.wrapping_add(offset as u16));
    }
    State { v, ..*state }
}

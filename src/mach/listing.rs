use super::{Address, Instruction, Memory, Word};

/// ## Disassembly listing
///
/// Walks a memory image from address 0 and renders one instruction per
/// line. Cells that do not decode, or whose operands would run past the
/// end of the image, are shown as `DATA`. Intcode freely mixes code and
/// data so the listing is a best guess, not a proof.

#[derive(Debug, Clone, Default)]
pub struct Listing {
    lines: Vec<(Address, String)>,
}

impl Listing {
    pub fn disassemble(image: &[Word]) -> Listing {
        let memory = Memory::new(image.to_vec());
        let mut lines = vec![];
        let mut address = 0;
        while address < image.len() {
            match Instruction::decode(&memory, address) {
                Ok(ins) if address + ins.len() <= image.len() => {
                    lines.push((address, ins.to_string()));
                    address += ins.len();
                }
                _ => {
                    lines.push((address, format!("DATA {}", image[address])));
                    address += 1;
                }
            }
        }
        Listing { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// The rendered instruction starting at `address`, if one does.
    pub fn line(&self, address: Address) -> Option<&str> {
        match self.lines.binary_search_by_key(&address, |(a, _)| *a) {
            Ok(index) => Some(&self.lines[index].1),
            Err(_) => None,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &(Address, String)> {
        self.lines.iter()
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (address, line) in &self.lines {
            writeln!(f, "{:>5}: {}", address, line)?;
        }
        Ok(())
    }
}

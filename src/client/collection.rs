//-
// Copyright (c) 2026, the mailcove authors
//
// This file is part of mailcove.
//
// Mailcove is free software: you can  redistribute it and/or modify it under
// the terms of  the GNU General Public  License as published  by the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.
//
// Mailcove is distributed  in the hope that it  will be useful, but WITHOUT
// ANY WARRANTY; without  even the implied  warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for
// more details.
//
// You should have received a copy of the GNU General Public License along
// with mailcove. If not, see <http://www.gnu.org/licenses/>.

use crate::client::message::Message;

/// The result of a mailbox search: messages in ascending UID order.
#[derive(Default)]
pub struct MessageCollection {
    messages: Vec<Message>,
}

impl MessageCollection {
    pub fn new() -> Self {
        MessageCollection::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn first(&self) -> Option<&Message> {
        self.messages.first()
    }

    pub fn first_mut(&mut self) -> Option<&mut Message> {
        self.messages.first_mut()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Message> {
        self.messages.last_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    /// Body access needs `&mut Message` since bodies decode lazily.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Message> {
        self.messages.get_mut(index)
    }

    pub fn add(&mut self, message: Message) -> &mut Self {
        self.messages.push(message);
        self
    }

    /// Removes and returns the message with the given UID, if present.
    pub fn remove(&mut self, uid: u32) -> Option<Message> {
        let index = self.messages.iter().position(|m| uid == m.uid())?;
        Some(self.messages.remove(index))
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Message> {
        self.messages.iter_mut()
    }

    pub fn into_vec(self) -> Vec<Message> {
        self.messages
    }
}

impl IntoIterator for MessageCollection {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a mut MessageCollection {
    type Item = &'a mut Message;
    type IntoIter = std::slice::IterMut<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter_mut()
    }
}

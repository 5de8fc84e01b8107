//! The DNS message: header, question, and three record sections.

use crate::edns::Edns;
use crate::error::{Error, Result};
use crate::header::{Flags, Header};
use crate::question::Question;
use crate::rcode::{Rcode, ResponseCode};
use crate::record::{RRset, RecordParser, ResourceRecord};
use crate::rtype::RecordType;
use crate::wire::{MessageWriter, WireReader};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three record-carrying sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Records answering the question.
    Answer,
    /// Records pointing at authority, e.g. SOA for negatives.
    Authority,
    /// Related records; OPT lives here on the wire but is lifted out.
    Additional,
}

/// A complete message.
///
/// The single OPT pseudo-record is not kept in the additional section;
/// its content is exposed as [`Message::edns`] and re-materialised on
/// emit. The header rcode is already widened by the OPT extension bits
/// after a parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    header: Header,
    question: Option<Question>,
    answer: Vec<ResourceRecord>,
    authority: Vec<ResourceRecord>,
    additional: Vec<ResourceRecord>,
    edns: Option<Edns>,
}

impl Message {
    /// A recursion-desired query for one question, EDNS attached.
    pub fn query(question: Question) -> Self {
        Self {
            header: Header::new_query(),
            question: Some(question),
            answer: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
            edns: Some(Edns::new()),
        }
    }

    /// A response skeleton echoing a query's id, question, and RD bit.
    pub fn response_to(query: &Message) -> Self {
        let mut header = Header {
            id: query.header.id,
            flags: Flags::QR | (query.header.flags & Flags::RD),
            ..Header::default()
        };
        header.qdcount = u16::from(query.question.is_some());
        Self {
            header,
            question: query.question.clone(),
            answer: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
            edns: query.edns.clone(),
        }
    }

    /// The header.
    #[inline]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The header, mutably.
    #[inline]
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// The transaction id.
    #[inline]
    pub fn id(&self) -> u16 {
        self.header.id
    }

    /// Sets the transaction id.
    #[inline]
    pub fn set_id(&mut self, id: u16) {
        self.header.id = id;
    }

    /// The response code, extension bits included.
    #[inline]
    pub fn rcode(&self) -> Rcode {
        self.header.rcode
    }

    /// Sets the response code, updating the EDNS extension bits when the
    /// code needs them.
    pub fn set_rcode(&mut self, rcode: Rcode) {
        self.header.rcode = rcode;
        if rcode.extended_bits() != 0 {
            self.edns
                .get_or_insert_with(Edns::new)
                .set_extended_rcode(rcode.extended_bits());
        }
    }

    /// The question, if present.
    #[inline]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Sets the question.
    pub fn set_question(&mut self, question: Question) {
        self.question = Some(question);
        self.header.qdcount = 1;
    }

    /// The records of a section.
    pub fn section(&self, section: Section) -> &[ResourceRecord] {
        match section {
            Section::Answer => &self.answer,
            Section::Authority => &self.authority,
            Section::Additional => &self.additional,
        }
    }

    /// Appends a record to a section, keeping the header count in step.
    pub fn push(&mut self, section: Section, record: ResourceRecord) {
        match section {
            Section::Answer => {
                self.answer.push(record);
                self.header.ancount = self.answer.len() as u16;
            }
            Section::Authority => {
                self.authority.push(record);
                self.header.nscount = self.authority.len() as u16;
            }
            Section::Additional => {
                self.additional.push(record);
                self.update_arcount();
            }
        }
    }

    fn update_arcount(&mut self) {
        self.header.arcount = self.additional.len() as u16 + u16::from(self.edns.is_some());
    }

    /// The EDNS state, if any.
    #[inline]
    pub fn edns(&self) -> Option<&Edns> {
        self.edns.as_ref()
    }

    /// Replaces the EDNS state.
    pub fn set_edns(&mut self, edns: Option<Edns>) {
        self.edns = edns;
        self.update_arcount();
    }

    /// True for a response with the AA bit set.
    #[inline]
    pub fn is_authoritative(&self) -> bool {
        self.header.is_authoritative()
    }

    /// True when the TC bit is set.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.header.is_truncated()
    }

    /// Groups a section into RRsets by (owner, type, class).
    ///
    /// SIG/RRSIG records attach to the set whose type they cover at the
    /// same owner; a signature with nothing to cover becomes its own set.
    pub fn section_rrsets(&self, section: Section) -> Vec<RRset> {
        let records = self.section(section);
        let mut sets: Vec<RRset> = Vec::new();
        let mut sigs: Vec<&ResourceRecord> = Vec::new();

        for record in records {
            if record.rdata().as_sig().is_some() {
                sigs.push(record);
                continue;
            }
            match sets.iter_mut().find(|set| {
                set.name() == record.name()
                    && set.rtype() == record.rtype()
                    && set.rclass() == record.rclass()
            }) {
                Some(set) => {
                    set.add(record.clone());
                }
                None => sets.push(RRset::new(record.clone())),
            }
        }

        for sig in sigs {
            let covered = sig.rdata().as_sig().map(|s| s.covered());
            let target = sets.iter_mut().find(|set| {
                Some(set.rtype()) == covered
                    && set.name() == sig.name()
                    && set.rclass() == sig.rclass()
            });
            match target {
                Some(set) => set.add_sig(sig.clone()),
                None => sets.push(RRset::new(sig.clone())),
            }
        }

        sets
    }

    /// Parses a message, refusing count mismatches and overruns.
    pub fn parse(wire: &[u8]) -> Result<Self> {
        let mut reader = WireReader::new(wire);
        let mut header = Header::parse(&mut reader)?;

        let mut offset = reader.position();
        let mut question = None;
        for i in 0..header.qdcount {
            let (q, consumed) = Question::parse(wire, offset).map_err(|e| match e {
                Error::UnexpectedEof { .. } => Error::SectionCount {
                    section: "question",
                    expected: header.qdcount,
                },
                other => other,
            })?;
            offset += consumed;
            // Only the first question is meaningful to a resolver.
            if i == 0 {
                question = Some(q);
            }
        }

        let mut sections: [Vec<ResourceRecord>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        let mut edns = None;
        for (slot, (count, label)) in sections.iter_mut().zip([
            (header.ancount, "answer"),
            (header.nscount, "authority"),
            (header.arcount, "additional"),
        ]) {
            let mut parser = RecordParser::new(wire, offset, count);
            loop {
                let record = match parser.next() {
                    Ok(Some(record)) => record,
                    Ok(None) => break,
                    Err(Error::UnexpectedEof { .. }) => {
                        return Err(Error::SectionCount {
                            section: label,
                            expected: count,
                        });
                    }
                    Err(other) => return Err(other),
                };

                if record.rtype() == crate::rtype::Type::Known(RecordType::OPT) {
                    if edns.is_some() {
                        return Err(Error::DuplicateOpt);
                    }
                    let mut w = MessageWriter::default();
                    record.rdata().emit(&mut w, false)?;
                    edns = Some(Edns::from_opt(
                        record.rclass().code(),
                        record.ttl(),
                        w.as_bytes(),
                    )?);
                } else {
                    slot.push(record);
                }
            }
            offset = parser.offset();
        }

        if let Some(ref e) = edns {
            header.rcode = ResponseCode::from_parts(header.rcode.header_bits(), e.extended_rcode());
        }

        let [answer, authority, additional] = sections;
        Ok(Self {
            header,
            question,
            answer,
            authority,
            additional,
            edns,
        })
    }

    /// Emits the message with name compression.
    pub fn emit(&self) -> Result<Bytes> {
        let mut w = MessageWriter::with_capacity(512);

        let mut header = self.header.clone();
        header.qdcount = u16::from(self.question.is_some());
        header.ancount = self.answer.len() as u16;
        header.nscount = self.authority.len() as u16;
        header.arcount = self.additional.len() as u16 + u16::from(self.edns.is_some());
        header.emit(&mut w);

        if let Some(q) = &self.question {
            q.emit(&mut w);
        }
        for record in self.answer.iter().chain(&self.authority).chain(&self.additional) {
            record.emit(&mut w)?;
        }
        if let Some(edns) = &self.edns {
            let mut edns = edns.clone();
            edns.set_extended_rcode(self.header.rcode.extended_bits());
            edns.emit(&mut w)?;
        }

        Ok(w.freeze())
    }

    /// Emits the message, falling back to an empty buffer on length
    /// overflow inside a record. Use [`Message::emit`] where the error
    /// matters.
    pub fn to_wire(&self) -> Bytes {
        self.emit().unwrap_or_default()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ";; ->>HEADER<<- {}", self.header)?;
        if let Some(edns) = &self.edns {
            writeln!(f, ";; OPT PSEUDOSECTION: {edns}")?;
        }
        if let Some(q) = &self.question {
            writeln!(f, ";; QUESTION SECTION:\n;{q}")?;
        }
        for (label, records) in [
            ("ANSWER", &self.answer),
            ("AUTHORITY", &self.authority),
            ("ADDITIONAL", &self.additional),
        ] {
            if !records.is_empty() {
                writeln!(f, ";; {label} SECTION:")?;
                for record in records {
                    writeln!(f, "{record}")?;
                }
            }
        }
        Ok(())
    }
}
